use spbd_core::{Method, SimError, SimulationConfig, TimeUnits};
use std::path::PathBuf;

const SAMPLE: &str = "\
# cubic well, coarse grid
steps 10000000000
saveFreq 1000
timestep 0.001
temperature 4.11
damping 2.5
positionStart 1.5
positionSpacing 0.5
forceVector 24,9.375,1.5,-0.375,0,
dampingVector 1,1,1.5,2,2
method second
trajectoryOutputFile out/traj.csv
colour blue
";

#[test]
fn parses_every_recognised_key() {
    let config = SimulationConfig::parse(SAMPLE).unwrap();
    assert_eq!(config.steps, 10_000_000_000);
    assert_eq!(config.save_freq, 1000);
    assert_eq!(config.timestep, 0.001);
    assert_eq!(config.temperature, 4.11);
    assert_eq!(config.damping, 2.5);
    assert_eq!(config.position_start, 1.5);
    assert_eq!(config.position_spacing, 0.5);
    assert_eq!(config.force_vector, vec![24.0, 9.375, 1.5, -0.375, 0.0]);
    assert_eq!(config.damping_vector, vec![1.0, 1.0, 1.5, 2.0, 2.0]);
    assert_eq!(config.method, Method::Second);
    assert_eq!(config.method.code(), 2);
    assert_eq!(config.trajectory_output_file, PathBuf::from("out/traj.csv"));
}

#[test]
fn missing_keys_keep_defaults() {
    let config = SimulationConfig::parse("steps 50\n").unwrap();
    let defaults = SimulationConfig::default();
    assert_eq!(config.steps, 50);
    assert_eq!(config.save_freq, defaults.save_freq);
    assert_eq!(config.method, Method::First);
    assert_eq!(config.time_units, TimeUnits::Steps);
    assert!(config.force_vector.is_empty());
    assert_eq!(config.seed, None);
}

#[test]
fn extension_keys_are_recognised() {
    let config = SimulationConfig::parse("timeUnits physical\nseed 77\n").unwrap();
    assert_eq!(config.time_units, TimeUnits::Physical);
    assert_eq!(config.seed, Some(77));
}

#[test]
fn malformed_number_reports_line_and_key() {
    let err = SimulationConfig::parse("steps 10\ntimestep fast\n").unwrap_err();
    match err {
        SimError::Config { line, key, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(key, "timestep");
            assert_eq!(value, "fast");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_vector_entry_is_rejected() {
    let err = SimulationConfig::parse("forceVector 1,two,3\n").unwrap_err();
    assert!(matches!(err, SimError::Config { line: 1, .. }));
}

#[test]
fn unknown_method_token_is_rejected() {
    assert!(SimulationConfig::parse("method third\n").is_err());
}

#[test]
fn parsed_sample_fails_validation_only_on_method() {
    let mut config = SimulationConfig::parse(SAMPLE).unwrap();
    assert!(matches!(config.validate(), Err(SimError::UnsupportedMethod(_))));
    config.method = Method::First;
    config.validate().unwrap();
    assert_eq!(config.sample_count(), 10_000_001);
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("spbd-config-{}.in", std::process::id()));
    std::fs::write(&path, SAMPLE).unwrap();
    let config = SimulationConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config.save_freq, 1000);
}

#[test]
fn load_missing_file_names_the_path() {
    let err = SimulationConfig::load("/nonexistent/spbd.in").unwrap_err();
    assert!(err.to_string().contains("Cannot read /nonexistent/spbd.in"));
}

#[test]
fn default_test_config_is_valid() {
    SimulationConfig::default_test().validate().unwrap();
}

#[test]
fn sample_count_saturates_instead_of_overflowing() {
    let config = SimulationConfig {
        steps:     u64::MAX,
        save_freq: 1,
        ..SimulationConfig::default_test()
    };
    config.validate().unwrap();
    assert_eq!(config.sample_count(), u64::MAX);
}

#[test]
fn tokens_after_the_value_are_ignored() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SimulationConfig::parse("forceVector 1, 2, 3\nsteps 20 30\n").unwrap();
    assert_eq!(config.force_vector, vec![1.0]);
    assert_eq!(config.steps, 20);
}
