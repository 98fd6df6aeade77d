// Config overrides and the default tuning table.

use ascii_ambient::config::{AmbientConfig, ConfigError};
use ascii_ambient::constants::*;

#[test]
fn partial_json_keeps_defaults() {
    let cfg = AmbientConfig::from_json(
        r#"{ "spotlight": { "radius_max": 260 }, "ambient": { "leaf_shadows": false } }"#,
    )
    .expect("valid override");
    assert_eq!(cfg.spotlight.radius_max, 260.0);
    assert_eq!(cfg.spotlight.radius_min, SPOTLIGHT_RADIUS_MIN);
    assert!(!cfg.ambient.leaf_shadows);
    assert_eq!(cfg.ambient.fade_step, FADE_STEP);
    assert_eq!(cfg.grid, AmbientConfig::default().grid);
    assert_eq!(cfg.highlight, AmbientConfig::default().highlight);
}

#[test]
fn empty_object_is_the_default() {
    let cfg = AmbientConfig::from_json("{}").expect("empty override");
    assert_eq!(cfg, AmbientConfig::default());
    assert!(AmbientConfig::default().validate().is_ok());
}

#[test]
fn malformed_json_is_rejected() {
    let err = AmbientConfig::from_json("{ spotlight: ").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    let err = AmbientConfig::from_json(r#"{ "grid": { "char_width": "wide" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn empty_alphabet_is_rejected() {
    let err = AmbientConfig::from_json(r#"{ "grid": { "alphabet": "" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAlphabet));
}

#[test]
fn out_of_range_values_name_their_field() {
    let err = AmbientConfig::from_json(r#"{ "spotlight": { "radius_max": 100 } }"#).unwrap_err();
    match err {
        ConfigError::OutOfRange { field, value, .. } => {
            assert_eq!(field, "spotlight.radius_max");
            assert_eq!(value, 100.0);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = AmbientConfig::from_json(r#"{ "dimming": { "floor": 1.5 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "dimming.floor",
            ..
        }
    ));

    let err = AmbientConfig::from_json(r#"{ "grid": { "char_width": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("grid.char_width"));
}

#[test]
fn config_round_trips_through_json() {
    let mut cfg = AmbientConfig::default();
    cfg.highlight.lit_alpha = 40;
    cfg.dimming.falloff_px = 32.0;
    let json = serde_json::to_string(&cfg).expect("serialize");
    assert_eq!(AmbientConfig::from_json(&json).expect("parse"), cfg);
}

#[test]
fn tuning_constants_are_consistent() {
    assert!(SPOTLIGHT_RADIUS_MIN < SPOTLIGHT_RADIUS_MAX);
    assert!(CHAR_WIDTH < LINE_HEIGHT);
    assert!(DAPPLE_ALPHA_DARK < DAPPLE_ALPHA_LIGHT);
    assert!(BRIGHT_ALPHA_DARK < BRIGHT_ALPHA_LIGHT);
    // ambient and spotlight stay below the highlight so text reads through
    assert!(DAPPLE_ALPHA_LIGHT < HL_ALPHA_LIGHT);
    assert!(BRIGHT_ALPHA_LIGHT < HL_ALPHA_LIGHT);
    assert!(HL_RETREAT_MAX_INTENSITY < HL_REVEAL_MIN_INTENSITY);
    assert!(HL_SWEEP_MULTIPLIER > 1.0);
    assert!((0.0..1.0).contains(&DIM_FLOOR));
    assert!(!GLYPH_ALPHABET.is_empty());
    assert!(DRIFT_INTERVAL_MS > 0);
}

#[test]
fn rejected_override_falls_back_to_defaults() {
    assert_eq!(AmbientConfig::from_json_or_default(None), AmbientConfig::default());
    assert_eq!(
        AmbientConfig::from_json_or_default(Some("{ not json")),
        AmbientConfig::default()
    );
    assert_eq!(
        AmbientConfig::from_json_or_default(Some(r#"{ "grid": { "alphabet": "" } }"#)),
        AmbientConfig::default()
    );
    let cfg = AmbientConfig::from_json_or_default(Some(r#"{ "dimming": { "floor": 0.5 } }"#));
    assert_eq!(cfg.dimming.floor, 0.5);
}

#[test]
fn timing_and_intensity_thresholds_are_validated() {
    let field_of = |json: &str| match AmbientConfig::from_json(json) {
        Err(ConfigError::OutOfRange { field, .. }) => field,
        other => panic!("expected range error for {json}, got {other:?}"),
    };
    assert_eq!(
        field_of(r#"{ "ambient": { "drift_interval_ms": 0 } }"#),
        "ambient.drift_interval_ms"
    );
    assert_eq!(
        field_of(r#"{ "ambient": { "drift_interval_ms": -5 } }"#),
        "ambient.drift_interval_ms"
    );
    assert_eq!(
        field_of(r#"{ "ambient": { "dapple_return_delay_ms": -1 } }"#),
        "ambient.dapple_return_delay_ms"
    );
    assert_eq!(
        field_of(r#"{ "spotlight": { "idle_timeout_ms": 0 } }"#),
        "spotlight.idle_timeout_ms"
    );
    assert_eq!(
        field_of(r#"{ "spotlight": { "accent_min_intensity": 1.5 } }"#),
        "spotlight.accent_min_intensity"
    );
    assert_eq!(
        field_of(r#"{ "highlight": { "reveal_min_intensity": -0.1 } }"#),
        "highlight.reveal_min_intensity"
    );
    assert_eq!(
        field_of(r#"{ "highlight": { "retreat_max_intensity": 0.5 } }"#),
        "highlight.retreat_max_intensity"
    );
    assert!(AmbientConfig::from_json(r#"{ "ambient": { "dapple_return_delay_ms": 0 } }"#).is_ok());
}
