//! Tunable parameters for the ambient renderer.
//!
//! Every field defaults to the value in `constants.rs`. A host page may
//! override any subset by handing a JSON object to `AmbientConfig::from_json`;
//! missing keys keep their defaults.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be {expected} (got {value})")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("glyph alphabet must not be empty")]
    EmptyAlphabet,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub font_size: f32,
    pub alphabet: String,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            char_width: CHAR_WIDTH,
            line_height: LINE_HEIGHT,
            font_size: FONT_SIZE,
            alphabet: GLYPH_ALPHABET.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientTuning {
    pub fade_step: f32,
    pub dapple_alpha_light: f32,
    pub dapple_alpha_dark: f32,
    pub dapple_fade_speed: f32,
    pub dapple_return_delay_ms: f64,
    pub drift_interval_ms: i32,
    pub leaf_shadows: bool,
}

impl Default for AmbientTuning {
    fn default() -> Self {
        Self {
            fade_step: FADE_STEP,
            dapple_alpha_light: DAPPLE_ALPHA_LIGHT,
            dapple_alpha_dark: DAPPLE_ALPHA_DARK,
            dapple_fade_speed: DAPPLE_FADE_SPEED,
            dapple_return_delay_ms: DAPPLE_RETURN_DELAY_MS,
            drift_interval_ms: DRIFT_INTERVAL_MS,
            leaf_shadows: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightTuning {
    pub bright_alpha_light: f32,
    pub bright_alpha_dark: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub radius_speed_gain: f32,
    pub radius_smoothing: f32,
    pub speed_decay: f32,
    pub idle_timeout_ms: f64,
    pub accent_min_intensity: f32,
    pub accent_chance: f32,
}

impl Default for SpotlightTuning {
    fn default() -> Self {
        Self {
            bright_alpha_light: BRIGHT_ALPHA_LIGHT,
            bright_alpha_dark: BRIGHT_ALPHA_DARK,
            radius_min: SPOTLIGHT_RADIUS_MIN,
            radius_max: SPOTLIGHT_RADIUS_MAX,
            radius_speed_gain: SPOTLIGHT_RADIUS_SPEED_GAIN,
            radius_smoothing: SPOTLIGHT_RADIUS_SMOOTHING,
            speed_decay: SPOTLIGHT_SPEED_DECAY,
            idle_timeout_ms: SPOTLIGHT_IDLE_TIMEOUT_MS,
            accent_min_intensity: ACCENT_MIN_INTENSITY,
            accent_chance: ACCENT_CHANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTuning {
    pub reveal_speed: f32,
    pub fade_out_speed: f32,
    pub sweep_multiplier: f32,
    pub sweep_sharpness: f32,
    pub lit_alpha: u8,
    pub alpha_light: f32,
    pub alpha_dark: f32,
    pub reveal_min_intensity: f32,
    pub retreat_max_intensity: f32,
}

impl Default for HighlightTuning {
    fn default() -> Self {
        Self {
            reveal_speed: HL_REVEAL_SPEED,
            fade_out_speed: HL_FADE_OUT_SPEED,
            sweep_multiplier: HL_SWEEP_MULTIPLIER,
            sweep_sharpness: HL_SWEEP_SHARPNESS,
            lit_alpha: HL_LIT_ALPHA,
            alpha_light: HL_ALPHA_LIGHT,
            alpha_dark: HL_ALPHA_DARK,
            reveal_min_intensity: HL_REVEAL_MIN_INTENSITY,
            retreat_max_intensity: HL_RETREAT_MAX_INTENSITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimTuning {
    pub floor: f32,
    pub falloff_px: f32,
}

impl Default for DimTuning {
    fn default() -> Self {
        Self {
            floor: DIM_FLOOR,
            falloff_px: DIM_FALLOFF_PX,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub grid: GridMetrics,
    pub ambient: AmbientTuning,
    pub spotlight: SpotlightTuning,
    pub highlight: HighlightTuning,
    pub dimming: DimTuning,
}

impl AmbientConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: AmbientConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like [`from_json`](Self::from_json), but a missing or rejected
    /// override leaves the defaults in place; the rejection is logged.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("[config] using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        positive("grid.char_width", self.grid.char_width)?;
        positive("grid.line_height", self.grid.line_height)?;
        positive("grid.font_size", self.grid.font_size)?;
        unit("ambient.fade_step", self.ambient.fade_step)?;
        unit("ambient.dapple_alpha_light", self.ambient.dapple_alpha_light)?;
        unit("ambient.dapple_alpha_dark", self.ambient.dapple_alpha_dark)?;
        unit("ambient.dapple_fade_speed", self.ambient.dapple_fade_speed)?;
        non_negative("ambient.dapple_return_delay_ms", self.ambient.dapple_return_delay_ms)?;
        if self.ambient.drift_interval_ms <= 0 {
            return Err(ConfigError::OutOfRange {
                field: "ambient.drift_interval_ms",
                expected: "> 0",
                value: self.ambient.drift_interval_ms as f64,
            });
        }
        unit("spotlight.bright_alpha_light", self.spotlight.bright_alpha_light)?;
        unit("spotlight.bright_alpha_dark", self.spotlight.bright_alpha_dark)?;
        unit("spotlight.radius_smoothing", self.spotlight.radius_smoothing)?;
        unit("spotlight.speed_decay", self.spotlight.speed_decay)?;
        unit("spotlight.accent_chance", self.spotlight.accent_chance)?;
        unit("spotlight.accent_min_intensity", self.spotlight.accent_min_intensity)?;
        positive("spotlight.idle_timeout_ms", self.spotlight.idle_timeout_ms as f32)?;
        positive("spotlight.radius_min", self.spotlight.radius_min)?;
        if self.spotlight.radius_max < self.spotlight.radius_min {
            return Err(ConfigError::OutOfRange {
                field: "spotlight.radius_max",
                expected: ">= spotlight.radius_min",
                value: self.spotlight.radius_max as f64,
            });
        }
        positive("highlight.reveal_speed", self.highlight.reveal_speed)?;
        positive("highlight.fade_out_speed", self.highlight.fade_out_speed)?;
        positive("highlight.sweep_multiplier", self.highlight.sweep_multiplier)?;
        positive("highlight.sweep_sharpness", self.highlight.sweep_sharpness)?;
        unit("highlight.alpha_light", self.highlight.alpha_light)?;
        unit("highlight.alpha_dark", self.highlight.alpha_dark)?;
        unit("highlight.reveal_min_intensity", self.highlight.reveal_min_intensity)?;
        unit("highlight.retreat_max_intensity", self.highlight.retreat_max_intensity)?;
        if self.highlight.retreat_max_intensity >= self.highlight.reveal_min_intensity {
            return Err(ConfigError::OutOfRange {
                field: "highlight.retreat_max_intensity",
                expected: "< highlight.reveal_min_intensity",
                value: self.highlight.retreat_max_intensity as f64,
            });
        }
        unit("dimming.floor", self.dimming.floor)?;
        positive("dimming.falloff_px", self.dimming.falloff_px)?;
        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "> 0",
            value: v as f64,
        })
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: ">= 0",
            value: v,
        })
    }
}

fn unit(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "within [0, 1]",
            value: v as f64,
        })
    }
}
