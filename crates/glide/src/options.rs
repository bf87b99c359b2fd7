//! Pooled parameter bundles and the two canned animation strategies.
//!
//! A user-supplied animation callback receives an [`AnimateOptions`]: the
//! previous and new rectangles plus two built-in ways of moving between
//! them. The callback returns a [`TimerPlan`] which the agent loads into a
//! pooled timer. The bundle itself is pooled and returned as soon as the
//! callback has run; plans capture everything they need by value.

use std::rc::Rc;

use crate::easing::EasingFunction;
use crate::error::Result;
use crate::geometry::{Rect, TransformDelta};
use crate::host::Host;
use crate::pool::PoolItem;
use crate::style::{StyleProperty, StyleValue};
use crate::timer::TimerPlan;

/// A user-supplied animation strategy.
///
/// Shared via `Rc` so the agent can invoke it without holding a borrow of
/// the per-key entry it is stored in.
pub type AnimateFn<H> = Rc<dyn Fn(&AnimateOptions) -> Result<TimerPlan<H>>>;

/// Linear elapsed fraction on a `[0, 1]` scale, clamped so a snapshot can
/// never overshoot the rectangles it interpolates between.
fn progress_fraction(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    }
}

/// Rectangles and canned strategies handed to an animation callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimateOptions {
    /// The node's rectangle before the update (or the canceled animation's
    /// snapshot when one was in flight).
    pub last_rect: Rect,
    /// The node's freshly measured rectangle.
    pub rect: Rect,
}

impl AnimateOptions {
    pub(crate) fn prime(&mut self, last_rect: Rect, rect: Rect) {
        self.last_rect = last_rect;
        self.rect = rect;
    }

    /// Manually stepped interpolation from `from` to `to` with the default
    /// easing curve.
    ///
    /// Each repaint computes a progress fraction from elapsed time, eases
    /// it, interpolates the rectangle, derives the transform against the
    /// final layout position and writes it as a style patch. Completes when
    /// the fraction reaches 1. The snapshot tracks the eased interpolated
    /// rectangle exactly, so cancellation mid-flight is precise.
    pub fn interpolate_from<H: Host>(
        &self,
        from: Rect,
        to: Rect,
        duration_ms: f64,
    ) -> TimerPlan<H> {
        self.interpolate_from_with(from, to, duration_ms, EasingFunction::default())
    }

    /// [`interpolate_from`](Self::interpolate_from) with an easing curve
    /// applied to the progress fraction.
    pub fn interpolate_from_with<H: Host>(
        &self,
        from: Rect,
        to: Rect,
        duration_ms: f64,
        easing: EasingFunction,
    ) -> TimerPlan<H> {
        let mut started_at: Option<f64> = None;
        TimerPlan::new()
            .step_loop(move |cx| {
                let t0 = *started_at.get_or_insert(cx.now_ms);
                let fraction = progress_fraction(cx.now_ms - t0, duration_ms);
                let current = from.interpolate_towards(&to, easing.evaluate(fraction));
                cx.apply_style(&[
                    (
                        StyleProperty::Transform,
                        StyleValue::Transform(current.delta_transform(&to)),
                    ),
                    (StyleProperty::Layer, StyleValue::Layer(1)),
                ]);
                cx.set_snapshot(move |now_ms| {
                    let fraction = progress_fraction(now_ms - t0, duration_ms);
                    from.interpolate_towards(&to, easing.evaluate(fraction))
                });
                Ok(fraction)
            })
            .run(|cx| {
                cx.clear_style();
                Ok(())
            })
    }

    /// Host-eased transition from `from` to `to`.
    ///
    /// Sets the start-offset transform with transitions disabled, forces a
    /// layout flush by yielding a repaint, then enables the eased transition
    /// and sets the zero-offset transform, waiting out the duration. The
    /// host does the per-frame interpolation, which is cheaper and smoother
    /// but opaque mid-flight: cancellation estimates the position from the
    /// elapsed-time fraction rather than the host's true rendered position.
    pub fn transition_from<H: Host>(&self, from: Rect, to: Rect, duration_ms: f64) -> TimerPlan<H> {
        let start_delta = from.delta_transform(&to);
        TimerPlan::new()
            .frame(move |cx| {
                cx.apply_style(&[
                    (StyleProperty::Transform, StyleValue::Transform(start_delta)),
                    (StyleProperty::TransitionDuration, StyleValue::DurationMs(0.0)),
                    (StyleProperty::Layer, StyleValue::Layer(1)),
                ]);
                // Movement has not started: the truthful snapshot is the
                // starting rectangle itself.
                cx.set_snapshot(move |_| from);
                Ok(())
            })
            .frame(move |cx| {
                cx.apply_style(&[
                    (
                        StyleProperty::TransitionDuration,
                        StyleValue::DurationMs(duration_ms),
                    ),
                    (
                        StyleProperty::Transform,
                        StyleValue::Transform(TransformDelta::IDENTITY),
                    ),
                ]);
                let t0 = cx.now_ms;
                cx.set_snapshot(move |now_ms| {
                    from.interpolate_towards(&to, progress_fraction(now_ms - t0, duration_ms))
                });
                Ok(())
            })
            .wait(duration_ms)
            .run(|cx| {
                cx.clear_style();
                Ok(())
            })
    }
}

impl PoolItem for AnimateOptions {
    fn fresh() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.last_rect = Rect::ZERO;
        self.rect = Rect::ZERO;
    }
}
