//! The boundary with the host rendering tree.
//!
//! The coordinator does not own a rendering tree; it observes one. The host
//! supplies node identity, measurement, and style mutation through this
//! trait, and drives the coordinator's clock from its own update loop:
//!
//! - once per update cycle, after the triggering update has fully applied,
//!   the host calls [`AnimationAgent::flush`] (the coalesced "soon" tick
//!   that batches repositioning and resize work);
//! - once per repaint opportunity, the host calls
//!   [`AnimationAgent::advance_frame`] while
//!   [`AnimationAgent::needs_frames`] reports true.
//!
//! Timestamps are milliseconds on a monotonically non-decreasing host clock;
//! fixed-duration waits are resolved at repaint granularity.
//!
//! [`AnimationAgent::flush`]: crate::agent::AnimationAgent::flush
//! [`AnimationAgent::advance_frame`]: crate::agent::AnimationAgent::advance_frame
//! [`AnimationAgent::needs_frames`]: crate::agent::AnimationAgent::needs_frames

use std::fmt;

use crate::geometry::Rect;
use crate::style::{StyleProperty, StyleValue};

/// The host rendering tree the coordinator animates against.
///
/// Methods take `&mut self` because measurement and style writes may force
/// the host to flush lazily batched layout.
pub trait Host {
    /// A reference to a live visual node. The host owns node lifetime; the
    /// coordinator only ever holds these as back-references and compares
    /// them to detect stale unregistrations.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Measure a node's on-screen rectangle relative to `root`, reflecting
    /// current layout. Must force a layout flush if the host batches layout
    /// lazily.
    fn measure_rect(&mut self, node: &Self::Node, root: &Self::Node) -> Rect;

    /// Read the current value of an overridable style property, for patch
    /// restoration bookkeeping. Unset properties read as
    /// [`StyleValue::Initial`].
    fn read_style(&mut self, node: &Self::Node, property: StyleProperty) -> StyleValue;

    /// Set (or, for [`StyleValue::Initial`], unset) a style property on the
    /// node. When a non-zero [`StyleProperty::TransitionDuration`] is in
    /// effect, the host is expected to ease [`StyleProperty::Transform`]
    /// changes itself over that duration.
    fn write_style(&mut self, node: &Self::Node, property: StyleProperty, value: &StyleValue);
}
