use spbd_core::{build_step_tables, SimError, SimulationConfig};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

fn graded_damping_config() -> SimulationConfig {
    SimulationConfig {
        timestep:         0.5,
        temperature:      1.0,
        damping:          2.0,
        position_spacing: 1.0,
        force_vector:     vec![4.0, 4.0, 4.0],
        damping_vector:   vec![1.0, 2.0, 4.0],
        ..SimulationConfig::default()
    }
}

#[test]
fn external_step_is_force_times_dt_over_damping() {
    let tables = build_step_tables(&graded_damping_config()).unwrap();
    assert_eq!(tables.external.values(), &[1.0, 0.5, 0.25]);
}

#[test]
fn thermal_scale_is_sqrt_two_kt_dt_over_damping() {
    let tables = build_step_tables(&graded_damping_config()).unwrap();
    let expected = [0.5f32.sqrt(), 0.25f32.sqrt(), 0.125f32.sqrt()];
    for (got, want) in tables.thermal.values().iter().zip(expected) {
        assert!(approx(*got, want), "thermal {got} != {want}");
    }
}

#[test]
fn tables_share_the_config_grid() {
    let config = graded_damping_config();
    let tables = build_step_tables(&config).unwrap();
    assert_eq!(tables.len(), 3);
    assert!(tables.external.is_aligned_with(&config.force_grid()));
    assert!(tables.thermal.is_aligned_with(&config.force_grid()));
    tables.check_matches(&config).unwrap();
}

#[test]
fn zero_temperature_gives_zero_thermal_scale() {
    let config = SimulationConfig {
        temperature: 0.0,
        ..graded_damping_config()
    };
    let tables = build_step_tables(&config).unwrap();
    assert!(tables.thermal.values().iter().all(|&s| s == 0.0));
}

#[test]
fn zero_damping_entry_is_rejected() {
    let config = SimulationConfig {
        damping_vector: vec![1.0, 0.0, 1.0],
        ..graded_damping_config()
    };
    let err = build_step_tables(&config).unwrap_err();
    assert!(
        matches!(err, SimError::NonPositiveDampingEntry { index: 1, value } if value == 0.0),
        "unexpected error: {err}"
    );
}

#[test]
fn zero_bulk_damping_is_rejected() {
    let config = SimulationConfig {
        damping: 0.0,
        ..graded_damping_config()
    };
    assert!(matches!(
        build_step_tables(&config),
        Err(SimError::NonPositiveDamping(_))
    ));
}

#[test]
fn mismatched_grids_are_rejected() {
    let config = SimulationConfig {
        damping_vector: vec![1.0, 1.0],
        ..graded_damping_config()
    };
    assert!(matches!(
        build_step_tables(&config),
        Err(SimError::GridLengthMismatch { force: 3, damping: 2 })
    ));
}

#[test]
fn negative_temperature_and_bad_force_are_rejected() {
    let cold = SimulationConfig {
        temperature: -1.0,
        ..graded_damping_config()
    };
    assert!(matches!(
        build_step_tables(&cold),
        Err(SimError::NegativeTemperature(_))
    ));

    let nan_force = SimulationConfig {
        force_vector: vec![4.0, f32::NAN, 4.0],
        ..graded_damping_config()
    };
    assert!(matches!(
        build_step_tables(&nan_force),
        Err(SimError::NonFiniteForce { index: 1, .. })
    ));
}

#[test]
fn empty_grid_is_rejected() {
    let config = SimulationConfig {
        force_vector:   vec![],
        damping_vector: vec![],
        ..graded_damping_config()
    };
    assert!(matches!(build_step_tables(&config), Err(SimError::EmptyGrid)));
}

#[test]
fn zero_and_negative_spacing_are_rejected() {
    for spacing in [0.0, -0.5] {
        let config = SimulationConfig {
            position_spacing: spacing,
            ..graded_damping_config()
        };
        assert!(
            matches!(build_step_tables(&config), Err(SimError::NonPositiveSpacing(s)) if s == spacing),
            "spacing {spacing} accepted"
        );
    }
}

#[test]
fn zero_timestep_is_rejected() {
    let config = SimulationConfig {
        timestep: 0.0,
        ..graded_damping_config()
    };
    assert!(matches!(
        build_step_tables(&config),
        Err(SimError::NonPositiveTimestep(_))
    ));
}

#[test]
fn infinite_scalars_and_damping_entries_are_rejected() {
    let base = graded_damping_config();

    let timestep = SimulationConfig { timestep: f32::INFINITY, ..base.clone() };
    assert!(matches!(build_step_tables(&timestep), Err(SimError::NonPositiveTimestep(_))));

    let damping = SimulationConfig { damping: f32::INFINITY, ..base.clone() };
    assert!(matches!(build_step_tables(&damping), Err(SimError::NonPositiveDamping(_))));

    let spacing = SimulationConfig { position_spacing: f32::INFINITY, ..base.clone() };
    assert!(matches!(build_step_tables(&spacing), Err(SimError::NonPositiveSpacing(_))));

    let entry = SimulationConfig {
        damping_vector: vec![1.0, f32::INFINITY, 1.0],
        ..base
    };
    assert!(matches!(
        build_step_tables(&entry),
        Err(SimError::NonPositiveDampingEntry { index: 1, .. })
    ));
}

#[test]
fn overflowing_external_step_is_rejected() {
    let config = SimulationConfig {
        timestep:       1.0,
        damping:        1.0,
        force_vector:   vec![3e38, 0.0, -1.0],
        damping_vector: vec![1e-3, 1.0, 1.0],
        ..graded_damping_config()
    };
    let err = build_step_tables(&config).unwrap_err();
    assert!(
        matches!(err, SimError::NonFiniteStep { table: "external", index: 0, .. }),
        "unexpected error: {err}"
    );
}
