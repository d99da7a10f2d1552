//! Effect tuning presets.
//!
//! Every magic number the page effects use lives here so a host can load
//! them from TOML. Missing keys fall back to [`EffectsConfig::standard`].

use serde::{Deserialize, Serialize};

use crate::error::{EffectError, Result};

/// Cursor and trailing follower.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Smoothing factor of the small cursor dot.
    pub cursor_factor: f32,
    /// Smoothing factor of the larger trailing ring.
    pub follower_factor: f32,
    /// Opacity of the follower while the pointer is inside the window.
    pub follower_opacity: f32,
    /// Stop pursuing once this close to the pointer (pixels).
    pub settle_epsilon: Option<f32>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            cursor_factor: 0.2,
            follower_factor: 0.1,
            follower_opacity: 0.5,
            settle_epsilon: None,
        }
    }
}

/// Grid tilt and magnetic button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Pixels of pointer offset per degree of rotation.
    pub divisor: f32,
    pub hover_scale: f32,
    pub perspective: f32,
    /// Smoothing factor; 1.0 applies the pointer position immediately.
    pub factor: f32,
    pub settle_epsilon: f32,
    /// Fraction of the pointer offset a magnetic button travels.
    pub magnetic_strength: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            divisor: 20.0,
            hover_scale: 1.02,
            perspective: 1000.0,
            factor: 1.0,
            settle_epsilon: 0.01,
            magnetic_strength: 0.3,
        }
    }
}

/// Fixed-duration timings in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub counter_ms: f64,
    pub distortion_enter_ms: f64,
    pub distortion_leave_ms: f64,
    pub loader_ms: f64,
    pub grid_stagger_ms: f64,
    pub grid_reveal_ms: f64,
    pub submit_ms: f64,
    pub notification_ms: f64,
    pub notification_transition_ms: f64,
    pub smooth_scroll_ms: f64,
    /// Hero title word delays: `title_base_s + index * title_step_s`.
    pub title_base_s: f32,
    pub title_step_s: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            counter_ms: 2000.0,
            distortion_enter_ms: 600.0,
            distortion_leave_ms: 400.0,
            loader_ms: 2500.0,
            grid_stagger_ms: 100.0,
            grid_reveal_ms: 800.0,
            submit_ms: 1500.0,
            notification_ms: 3000.0,
            notification_transition_ms: 400.0,
            smooth_scroll_ms: 600.0,
            title_base_s: 2.5,
            title_step_s: 0.2,
        }
    }
}

/// Scroll-linked effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub hero_parallax: f32,
    /// Used when a layer's speed attribute is missing or unparsable.
    pub default_parallax_speed: f32,
    /// Space left for the fixed header when jumping to an anchor.
    pub header_offset: f32,
    pub swipe_threshold: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            hero_parallax: 0.3,
            default_parallax_speed: 0.5,
            header_offset: 100.0,
            swipe_threshold: 50.0,
        }
    }
}

/// Visibility thresholds and margins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// False mirrors a host without intersection observation.
    pub observer_supported: bool,
    pub reveal_threshold: f32,
    pub grid_threshold: f32,
    pub counter_threshold: f32,
    pub lazy_threshold: f32,
    pub lazy_margin_y: f32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            observer_supported: true,
            reveal_threshold: 0.1,
            grid_threshold: 0.1,
            counter_threshold: 0.5,
            lazy_threshold: 0.01,
            lazy_margin_y: 50.0,
        }
    }
}

/// CSS transition speeds written when reduced motion is requested.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpeeds {
    pub fast_s: f32,
    pub medium_s: f32,
    pub slow_s: f32,
}

impl TransitionSpeeds {
    pub const REDUCED: TransitionSpeeds = TransitionSpeeds {
        fast_s: 0.1,
        medium_s: 0.2,
        slow_s: 0.3,
    };

    /// Root custom properties the host writes, e.g. `("--transition-fast", "0.1s")`
    pub fn css_properties(&self) -> [(&'static str, String); 3] {
        [
            ("--transition-fast", format!("{}s", self.fast_s)),
            ("--transition-medium", format!("{}s", self.medium_s)),
            ("--transition-slow", format!("{}s", self.slow_s)),
        ]
    }
}

/// Configuration for every page effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub cursor: CursorConfig,
    pub tilt: TiltConfig,
    pub timing: TimingConfig,
    pub scroll: ScrollConfig,
    pub visibility: VisibilityConfig,
    /// The user prefers reduced motion.
    pub reduced_motion: bool,
    /// Overrides for the stylesheet's transition speeds, if any.
    pub transition_speeds: Option<TransitionSpeeds>,
    /// Multiplier applied to animated durations (not to plain delays).
    pub duration_scale: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EffectsConfig {
    /// Standard configuration.
    pub fn standard() -> Self {
        Self {
            cursor: CursorConfig::default(),
            tilt: TiltConfig::default(),
            timing: TimingConfig::default(),
            scroll: ScrollConfig::default(),
            visibility: VisibilityConfig::default(),
            reduced_motion: false,
            transition_speeds: None,
            duration_scale: 1.0,
        }
    }

    /// Configuration for users who prefer reduced motion.
    pub fn reduced_motion() -> Self {
        Self {
            reduced_motion: true,
            transition_speeds: Some(TransitionSpeeds::REDUCED),
            duration_scale: 0.25,
            ..Self::standard()
        }
    }

    /// Parse from TOML, then validate.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EffectsConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the reduced-motion preset if the host reports the preference.
    pub fn with_reduced_motion(self, prefers_reduced: bool) -> Self {
        if prefers_reduced && !self.reduced_motion {
            tracing::debug!("reduced motion requested, shortening transitions");
            Self {
                reduced_motion: true,
                transition_speeds: Some(TransitionSpeeds::REDUCED),
                duration_scale: self.duration_scale.min(0.25),
                ..self
            }
        } else {
            self
        }
    }

    /// Set whether the host supports visibility observation.
    pub fn with_observer_supported(mut self, supported: bool) -> Self {
        self.visibility.observer_supported = supported;
        self
    }

    /// Set the cursor settle epsilon.
    pub fn with_cursor_settle(mut self, epsilon: Option<f32>) -> Self {
        self.cursor.settle_epsilon = epsilon;
        self
    }

    /// Scale an animated duration by [`Self::duration_scale`].
    pub fn animated_ms(&self, ms: f64) -> f64 {
        ms * self.duration_scale
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        let factors = [
            ("cursor.cursor_factor", self.cursor.cursor_factor),
            ("cursor.follower_factor", self.cursor.follower_factor),
            ("tilt.factor", self.tilt.factor),
        ];
        for (name, factor) in factors {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(EffectError::Config(format!(
                    "{name} must lie in (0, 1], got {factor}"
                )));
            }
        }

        let t = &self.timing;
        let durations = [
            ("timing.counter_ms", t.counter_ms),
            ("timing.distortion_enter_ms", t.distortion_enter_ms),
            ("timing.distortion_leave_ms", t.distortion_leave_ms),
            ("timing.loader_ms", t.loader_ms),
            ("timing.grid_stagger_ms", t.grid_stagger_ms),
            ("timing.grid_reveal_ms", t.grid_reveal_ms),
            ("timing.submit_ms", t.submit_ms),
            ("timing.notification_ms", t.notification_ms),
            ("timing.notification_transition_ms", t.notification_transition_ms),
            ("timing.smooth_scroll_ms", t.smooth_scroll_ms),
            ("duration_scale", self.duration_scale),
        ];
        for (name, ms) in durations {
            if !ms.is_finite() || ms < 0.0 {
                return Err(EffectError::Config(format!(
                    "{name} must be a non-negative number, got {ms}"
                )));
            }
        }

        let v = &self.visibility;
        for (name, threshold) in [
            ("visibility.reveal_threshold", v.reveal_threshold),
            ("visibility.grid_threshold", v.grid_threshold),
            ("visibility.counter_threshold", v.counter_threshold),
            ("visibility.lazy_threshold", v.lazy_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(EffectError::Config(format!(
                    "{name} must lie in [0, 1], got {threshold}"
                )));
            }
        }

        if !self.tilt.divisor.is_finite() || self.tilt.divisor == 0.0 {
            return Err(EffectError::Config(format!(
                "tilt.divisor must be a finite non-zero number, got {}",
                self.tilt.divisor
            )));
        }

        let epsilons = [
            ("tilt.settle_epsilon", Some(self.tilt.settle_epsilon)),
            ("cursor.settle_epsilon", self.cursor.settle_epsilon),
        ];
        for (name, epsilon) in epsilons {
            if let Some(epsilon) = epsilon {
                if !(epsilon.is_finite() && epsilon > 0.0) {
                    return Err(EffectError::Config(format!(
                        "{name} must be a positive finite number, got {epsilon}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_valid() {
        let config = EffectsConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.cursor.cursor_factor, 0.2);
        assert_eq!(config.timing.counter_ms, 2000.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EffectsConfig::from_toml_str(
            r#"
            reduced_motion = false

            [cursor]
            follower_factor = 0.05

            [timing]
            loader_ms = 1000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.cursor.follower_factor, 0.05);
        assert_eq!(config.cursor.cursor_factor, 0.2);
        assert_eq!(config.timing.loader_ms, 1000.0);
        assert_eq!(config.timing.submit_ms, 1500.0);
    }

    #[test]
    fn test_out_of_range_factor_rejected() {
        let err = EffectsConfig::from_toml_str("[cursor]\ncursor_factor = 1.5\n").unwrap_err();
        assert!(matches!(err, EffectError::Config(_)));
    }

    #[test]
    fn test_bad_settle_epsilon_rejected() {
        for text in [
            "[tilt]\nsettle_epsilon = 0.0\n",
            "[tilt]\nsettle_epsilon = -0.5\n",
            "[tilt]\nsettle_epsilon = nan\n",
            "[cursor]\nsettle_epsilon = 0.0\n",
            "[cursor]\nsettle_epsilon = inf\n",
        ] {
            let err = EffectsConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, EffectError::Config(_)), "{text:?} accepted");
        }

        let config = EffectsConfig::standard().with_cursor_settle(Some(f32::NAN));
        assert!(matches!(config.validate(), Err(EffectError::Config(_))));
        let config = EffectsConfig::standard().with_cursor_settle(Some(0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_divisor_rejected() {
        for text in [
            "[tilt]\ndivisor = nan\n",
            "[tilt]\ndivisor = inf\n",
            "[tilt]\ndivisor = 0.0\n",
        ] {
            let err = EffectsConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, EffectError::Config(_)), "{text:?} accepted");
        }
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = EffectsConfig::from_toml_str("cursor = [").unwrap_err();
        assert!(matches!(err, EffectError::ConfigParse(_)));
    }

    #[test]
    fn test_reduced_motion_preset() {
        let config = EffectsConfig::standard().with_reduced_motion(true);
        assert!(config.reduced_motion);
        assert_eq!(config.transition_speeds, Some(TransitionSpeeds::REDUCED));
        assert_eq!(config.animated_ms(2000.0), 500.0);

        let props = TransitionSpeeds::REDUCED.css_properties();
        assert_eq!(props[0], ("--transition-fast", "0.1s".to_string()));
        assert_eq!(props[2], ("--transition-slow", "0.3s".to_string()));

        let untouched = EffectsConfig::standard().with_reduced_motion(false);
        assert_eq!(untouched, EffectsConfig::standard());
    }
}
