use spbd_core::{
    engine::SimEngine,
    noise::ZeroNoise,
    observer::Silent,
    profile::{cubic_force_profile, uniform_damping},
    summary::RunSummary,
    writer::write_trajectory_file,
    SimulationConfig,
};

fn cubic_config() -> SimulationConfig {
    let force = cubic_force_profile(0.1, 0.0, 6.0);
    let damping = uniform_damping(force.len(), 0.1);
    SimulationConfig {
        steps:            1_000,
        save_freq:        100,
        timestep:         0.001,
        temperature:      0.0,
        position_start:   1.0,
        position_spacing: 0.1,
        force_vector:     force.values().to_vec(),
        damping_vector:   damping.values().to_vec(),
        ..SimulationConfig::default()
    }
}

#[test]
fn trajectory_file_has_header_and_one_line_per_sample() {
    let mut engine = SimEngine::build(cubic_config(), ZeroNoise).unwrap();
    let output = engine.run(&mut Silent).unwrap();

    let path = std::env::temp_dir().join(format!("spbd-traj-{}.csv", std::process::id()));
    write_trajectory_file(&path, &output).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "step, position");
    assert_eq!(lines.len(), output.len() + 1);
    assert_eq!(lines[1], "0, 1");
    assert!(lines[2].starts_with("100, "));
}

#[test]
fn cold_particle_slides_towards_the_left_well() {
    // Minima of the cubic potential sit at x = 2 and x = 4; from x = 1 the
    // force points right and the particle settles near 2.
    let mut engine = SimEngine::build(
        SimulationConfig {
            steps: 20_000,
            ..cubic_config()
        },
        ZeroNoise,
    )
    .unwrap();
    let output = engine.run(&mut Silent).unwrap();
    let last = output.last_position().unwrap();
    assert!(last > 1.8 && last < 2.1, "final position {last}");
}

#[test]
fn summary_reports_range_and_round_trips_through_json() {
    let config = cubic_config();
    let mut engine = SimEngine::build(config.clone(), ZeroNoise).unwrap();
    let output = engine.run(&mut Silent).unwrap();

    let summary = RunSummary::from_output(&config, Some(5), &output).unwrap();
    assert_eq!(summary.samples, 11);
    assert_eq!(summary.start_position, 1.0);
    assert!(summary.min_position <= summary.final_position);
    assert!(summary.max_position >= summary.final_position);

    let json = summary.to_json().unwrap();
    let back: RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}
