//! Rectangle geometry for position animations.
//!
//! This module defines the two value types every animation is built from:
//! - `Rect`: an axis-aligned rectangle in root-relative coordinates
//! - `TransformDelta`: a translate/scale descriptor mapping one rect onto
//!   another, used to render a node at its final layout position while it
//!   visually occupies its previous one
//!
//! Both are plain `Copy` values with no shared ownership.

use serde::{Deserialize, Serialize};

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self.
    /// When t = 1.0, returns to.
    /// Values between 0.0 and 1.0 return intermediate values.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

/// Linear interpolation helper for f64 values.
#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

/// An axis-aligned rectangle in root-relative coordinates.
///
/// Width and height are expected to be non-negative; `Rect` trusts its
/// inputs and performs no clamping of its own. Interpolation factors are
/// likewise trusted to be in `[0, 1]` and clamped by callers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The zero rectangle.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Linearly interpolate every field towards `target`.
    ///
    /// At t = 0.0 the result equals self; at t = 1.0 it equals `target`.
    pub fn interpolate_towards(&self, target: &Rect, t: f64) -> Rect {
        self.interpolate(target, t)
    }

    /// Compute the transform that, applied to a node laid out at `target`,
    /// makes it visually coincide with self.
    ///
    /// The start frame of every animation depends on this matching the
    /// pre-animation layout exactly, so the arithmetic is exact: no rounding
    /// beyond host float precision. A degenerate `target` size yields a
    /// scale factor of 1 rather than a division by zero.
    pub fn delta_transform(&self, target: &Rect) -> TransformDelta {
        TransformDelta {
            translate_x: self.x - target.x,
            translate_y: self.y - target.y,
            scale_x: if target.width == 0.0 {
                1.0
            } else {
                self.width / target.width
            },
            scale_y: if target.height == 0.0 {
                1.0
            } else {
                self.height / target.height
            },
        }
    }

    /// Returns true when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }
}

/// A translate/scale descriptor mapping one rectangle onto another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDelta {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TransformDelta {
    /// The identity transform (zero offset, unit scale).
    pub const IDENTITY: TransformDelta = TransformDelta {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Returns true when this transform has no visual effect.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self::IDENTITY
    }
}

static_assertions::assert_impl_all!(Rect: Send, Sync, Copy);
static_assertions::assert_impl_all!(TransformDelta: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        let a = Rect::new(0.0, 100.0, 200.0, 40.0);
        let b = Rect::new(50.0, 300.0, 100.0, 80.0);

        assert_eq!(a.interpolate_towards(&b, 0.0), a);
        assert_eq!(a.interpolate_towards(&b, 1.0), b);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let a = Rect::new(0.0, 100.0, 200.0, 40.0);
        let b = Rect::new(0.0, 300.0, 200.0, 40.0);

        let mid = a.interpolate_towards(&b, 0.5);
        assert_eq!(mid, Rect::new(0.0, 200.0, 200.0, 40.0));
    }

    #[test]
    fn test_delta_transform_offset() {
        // A list row moving from y=100 to y=300 starts the animation offset
        // by (0, -200) relative to its new layout position.
        let old = Rect::new(0.0, 100.0, 200.0, 40.0);
        let new = Rect::new(0.0, 300.0, 200.0, 40.0);

        let delta = old.delta_transform(&new);
        assert_eq!(delta.translate_x, 0.0);
        assert_eq!(delta.translate_y, -200.0);
        assert_eq!(delta.scale_x, 1.0);
        assert_eq!(delta.scale_y, 1.0);
    }

    #[test]
    fn test_delta_transform_scale() {
        let old = Rect::new(0.0, 0.0, 100.0, 50.0);
        let new = Rect::new(0.0, 0.0, 200.0, 25.0);

        let delta = old.delta_transform(&new);
        assert_eq!(delta.scale_x, 0.5);
        assert_eq!(delta.scale_y, 2.0);
    }

    #[test]
    fn test_delta_transform_identity() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.delta_transform(&rect).is_identity());
    }

    #[test]
    fn test_delta_transform_degenerate_target() {
        let old = Rect::new(0.0, 0.0, 100.0, 50.0);
        let flat = Rect::new(0.0, 0.0, 0.0, 0.0);

        let delta = old.delta_transform(&flat);
        assert_eq!(delta.scale_x, 1.0);
        assert_eq!(delta.scale_y, 1.0);
    }

    #[test]
    fn test_f64_interpolate() {
        assert_eq!(0.0_f64.interpolate(&10.0, 0.25), 2.5);
        assert_eq!((-5.0_f64).interpolate(&5.0, 0.5), 0.0);
    }

    #[test]
    fn test_rect_serde_round_trip() {
        let rect = Rect::new(0.0, 100.0, 200.0, 40.0);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(serde_json::from_str::<Rect>(&json).unwrap(), rect);
    }

    #[test]
    fn test_is_finite() {
        assert!(Rect::new(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!Rect::new(f64::NAN, 0.0, 0.0, 0.0).is_finite());
        assert!(!Rect::new(0.0, f64::INFINITY, 0.0, 0.0).is_finite());
    }
}
