//! Animatable value types
//!
//! Provides the [`Interpolate`] trait for values a session can pursue, with
//! implementations for scalars and 2D vectors/points.

use obscura_core::{Point, Vec2};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone + Send + 'static {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Distance to `other`, used for convergence checks
    fn distance(&self, other: &Self) -> f32;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.distance(other) < epsilon
    }
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn distance(&self, other: &Self) -> f32 {
        (self - other).abs()
    }
}

// ============================================================================
// Vec2 / Point Implementation
// ============================================================================

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        Vec2::new(other.x - self.x, other.y - self.y).length()
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        other.offset_from(*self).length()
    }
}
