//! Easing curves
//!
//! Every curve maps linear progress in [0, 1] to perceptual progress in
//! [0, 1] with `f(0) = 0` and `f(1) = 1`. [`Easing::apply`] clamps its input
//! first, so callers may pass raw `elapsed / duration` ratios.

/// Easing function type
pub type EasingFn = fn(f32) -> f32;

/// An easing curve
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInCubic,
    /// `1 - (1 - t)^3`, used by counters and hover-out distortion
    EaseOutCubic,
    EaseInOutCubic,
    /// `1 - (1 - t)^4`, used by hover-in distortion
    EaseOutQuart,
    /// Caller-supplied curve; must map 0 to 0 and 1 to 1
    Custom(EasingFn),
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => linear(t),
            Easing::EaseInQuad => ease_in_quad(t),
            Easing::EaseOutQuad => ease_out_quad(t),
            Easing::EaseInCubic => ease_in_cubic(t),
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseInOutCubic => ease_in_out_cubic(t),
            Easing::EaseOutQuart => ease_out_quart(t),
            Easing::Custom(f) => f(t),
        }
    }
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    t.powi(2)
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    t.powi(3)
}

/// Fast start, slow end
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Sharper deceleration than cubic
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuart,
    ];

    #[test]
    fn test_easing_bounds() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_out_cubic_formula_and_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            let v = Easing::EaseOutCubic.apply(p);
            assert!((v - (1.0 - (1.0 - p).powi(3))).abs() < 1e-6);
            assert!(v >= prev);
            prev = v;
        }
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_quart_formula() {
        assert!((Easing::EaseOutQuart.apply(0.5) - 0.9375).abs() < 1e-6);
        assert!(ease_out_quart(0.5) > ease_out_cubic(0.5));
    }

    #[test]
    fn test_apply_clamps_input() {
        assert_eq!(Easing::EaseOutCubic.apply(1.7), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_custom_easing() {
        fn smoothstep(t: f32) -> f32 {
            t * t * (3.0 - 2.0 * t)
        }
        let easing = Easing::Custom(smoothstep);
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(easing.apply(2.0), 1.0);
    }
}
