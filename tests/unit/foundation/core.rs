use super::*;

#[test]
fn defaults_match_the_original_tool() {
    let cfg = AnimationConfig::default();
    assert_eq!(cfg.size, Size::new(200, 200));
    assert_eq!(cfg.duration_secs, 2.0);
    assert_eq!(cfg.fps, 30);
    cfg.validate().unwrap();
}

#[test]
fn two_seconds_at_thirty_fps_is_sixty_frames() {
    assert_eq!(AnimationConfig::default().frame_count(), 60);
}

#[test]
fn frame_count_rounds_partial_frames_up() {
    let cfg = AnimationConfig {
        duration_secs: 1.05,
        fps: 10,
        ..Default::default()
    };
    assert_eq!(cfg.frame_count(), 11);
}

#[test]
fn frame_count_ignores_float_noise() {
    let cfg = AnimationConfig {
        duration_secs: 0.1,
        fps: 30,
        ..Default::default()
    };
    assert_eq!(cfg.frame_count(), 3);
}

#[test]
fn timestamps_stay_inside_the_period() {
    let cfg = AnimationConfig {
        duration_secs: 1.05,
        fps: 10,
        ..Default::default()
    };
    let last = FrameIndex(cfg.frame_count() - 1);
    assert!(cfg.timestamp_for(last) < cfg.duration_secs);
    assert_eq!(cfg.timestamp_for(FrameIndex(0)), 0.0);
    assert!((cfg.timestamp_for(FrameIndex(5)) - 0.5).abs() < 1e-12);
}

#[test]
fn frame_delay_is_in_centiseconds() {
    let mut cfg = AnimationConfig::default();
    assert_eq!(cfg.frame_delay_cs(), 3);
    cfg.fps = 10;
    assert_eq!(cfg.frame_delay_cs(), 10);
    cfg.fps = 500;
    assert_eq!(cfg.frame_delay_cs(), 1);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let base = AnimationConfig::default();

    let zero_w = AnimationConfig {
        size: Size::new(0, 10),
        ..base.clone()
    };
    assert!(zero_w.validate().is_err());

    let huge = AnimationConfig {
        size: Size::new(MAX_SIDE + 1, 10),
        ..base.clone()
    };
    assert!(huge.validate().is_err());

    let no_time = AnimationConfig {
        duration_secs: 0.0,
        ..base.clone()
    };
    assert!(no_time.validate().is_err());

    let nan = AnimationConfig {
        duration_secs: f64::NAN,
        ..base.clone()
    };
    assert!(nan.validate().is_err());

    let no_fps = AnimationConfig { fps: 0, ..base };
    assert!(no_fps.validate().is_err());
}

#[test]
fn json_fields_fall_back_to_defaults() {
    let cfg: AnimationConfig = serde_json::from_str(r#"{ "fps": 12 }"#).unwrap();
    assert_eq!(cfg.fps, 12);
    assert_eq!(cfg.size, Size::new(200, 200));
    assert_eq!(cfg.duration_secs, 2.0);

    let cfg: AnimationConfig =
        serde_json::from_str(r#"{ "size": { "width": 64, "height": 32 }, "duration": 1.5 }"#)
            .unwrap();
    assert_eq!(cfg.size, Size::new(64, 32));
    assert_eq!(cfg.duration_secs, 1.5);
}

#[test]
fn json_rejects_unknown_fields() {
    assert!(serde_json::from_str::<AnimationConfig>(r#"{ "axis": "x" }"#).is_err());
}

#[test]
fn from_path_reports_missing_file_as_input_error() {
    let err = AnimationConfig::from_path(Path::new("target/does-not-exist/cfg.json")).unwrap_err();
    assert!(matches!(err, CardspinError::Input(_)));
}

#[test]
fn rgba_len_counts_four_bytes_per_pixel() {
    assert_eq!(Size::new(3, 2).rgba_len(), 24);
}
