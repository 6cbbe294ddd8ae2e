use {
    brightness::{PipelineConfig, PipelineError},
    std::time::Duration,
};

#[test]
fn test_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.device_id(), 0);
    assert_eq!(config.scale(), 1.0);
    assert_eq!(config.window_capacity(), 50);
    assert_eq!(config.threshold(), 40.0);
    assert_eq!(config.max_runtime(), None);
    assert_eq!(config.pull_timeout(), None);
    assert!(config.compute_display());
    assert!(config.compute_intensity());
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = PipelineConfig::default()
        .with_device_id(2)
        .with_scale(0.8)
        .with_window_capacity(10)
        .with_threshold(12.5)
        .with_max_runtime(Some(Duration::from_secs(5)))
        .with_pull_timeout(Some(Duration::from_millis(250)))
        .with_compute_display(false);
    assert!(config.validate().is_ok());

    let source = config.source_config();
    assert_eq!(source.device_id(), 2);
    assert_eq!(source.scale(), 0.8);
    assert_eq!(config.max_runtime(), Some(Duration::from_secs(5)));
    assert!(!config.compute_display());
}

#[test]
fn test_rejects_bad_values() {
    let bad = [
        PipelineConfig::default().with_window_capacity(0),
        PipelineConfig::default().with_scale(0.0),
        PipelineConfig::default().with_scale(1.5),
        PipelineConfig::default().with_scale(f32::NAN),
        PipelineConfig::default().with_threshold(f64::INFINITY),
        PipelineConfig::default().with_max_runtime(Some(Duration::ZERO)),
        PipelineConfig::default().with_pull_timeout(Some(Duration::ZERO)),
        PipelineConfig::default()
            .with_compute_display(false)
            .with_compute_intensity(false),
    ];
    for config in bad {
        assert!(
            matches!(config.validate(), Err(PipelineError::InvalidConfiguration(_))),
            "{:?} should be rejected",
            config
        );
    }
}

#[test]
fn test_error_display() {
    let error = PipelineError::InvalidState("start called twice".to_string());
    assert_eq!(error.to_string(), "invalid state: start called twice");
}
