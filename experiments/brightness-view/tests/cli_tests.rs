use {
    brightness::PipelineError,
    brightness_view::Args,
    clap::Parser,
    log::LevelFilter,
    std::time::Duration,
};

#[test]
fn test_defaults() {
    let args = Args::parse_from(["brightness-view"]);
    let config = args.to_config().unwrap();
    assert_eq!(config.device_id(), 0);
    assert_eq!(config.window_capacity(), 50);
    assert_eq!(config.threshold(), 40.0);
    assert_eq!(config.max_runtime(), None);
    assert!(!args.pattern);
    assert_eq!(args.level().unwrap(), base::default_level());
}

#[test]
fn test_flags() {
    let args = Args::parse_from([
        "brightness-view",
        "--device",
        "2",
        "--scale",
        "0.8",
        "-w",
        "20",
        "-t",
        "55.5",
        "--max-runtime",
        "1.5",
        "--pull-timeout",
        "2",
        "--pattern",
        "--log-level",
        "warn",
    ]);
    let config = args.to_config().unwrap();
    assert_eq!(config.device_id(), 2);
    assert_eq!(config.scale(), 0.8);
    assert_eq!(config.window_capacity(), 20);
    assert_eq!(config.threshold(), 55.5);
    assert_eq!(config.max_runtime(), Some(Duration::from_millis(1500)));
    assert_eq!(config.pull_timeout(), Some(Duration::from_secs(2)));
    assert!(args.pattern);
    assert_eq!(args.level().unwrap(), LevelFilter::Warn);
}

#[test]
fn test_rejects_bad_values() {
    for flag in ["--window=0", "--scale=1.2", "--max-runtime=-1", "--pull-timeout=0"] {
        let args = Args::parse_from(["brightness-view", flag]);
        assert!(
            matches!(args.to_config(), Err(PipelineError::InvalidConfiguration(_))),
            "{} should be rejected",
            flag
        );
    }
}

#[test]
fn test_unknown_log_level() {
    let args = Args::parse_from(["brightness-view", "--log-level", "loud"]);
    assert!(args.level().is_err());
}
