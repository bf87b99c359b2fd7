//! Style patches: recorded, restorable visual property overrides.
//!
//! The coordinator never mutates node styling directly. Every write goes
//! through a `StylePatch`, which records the pre-mutation value of each
//! property the first time it overwrites it. Clearing a patch restores
//! exactly those recorded values and only those, which makes patch
//! application idempotent and safe across overlapping animations on the
//! same node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::TransformDelta;
use crate::host::Host;

/// The visual properties the coordinator is allowed to override on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    /// Translate/scale override (CSS `transform` equivalent).
    Transform,
    /// Duration of host-driven eased transitions (CSS `transition-duration`
    /// equivalent). Zero disables host interpolation.
    TransitionDuration,
    /// Stacking-order override so a moving node renders above its siblings
    /// (CSS `z-index` equivalent).
    Layer,
}

/// A value for one of the overridable style properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleValue {
    /// A translate/scale transform.
    Transform(TransformDelta),
    /// A duration in milliseconds.
    DurationMs(f64),
    /// A stacking-order layer index.
    Layer(i32),
    /// The property is not set; writing this clears any override.
    Initial,
}

/// Style properties applied to a node plus the original values needed to
/// undo them.
///
/// `apply` records the first-seen original per property; `clear` restores
/// those originals and forgets them. `lift`/`reapply` temporarily remove and
/// re-establish the overrides without forgetting anything, which resize
/// re-measurement relies on.
#[derive(Debug, Default)]
pub struct StylePatch {
    applied: BTreeMap<StyleProperty, StyleValue>,
    originals: BTreeMap<StyleProperty, StyleValue>,
}

impl StylePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no overrides are in effect.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Apply property overrides to the node.
    ///
    /// For each property not already overwritten by this patch, the current
    /// host value is recorded before the new value is written. Re-applying
    /// a property keeps the first recorded original.
    pub fn apply<H: Host>(
        &mut self,
        host: &mut H,
        node: &H::Node,
        entries: &[(StyleProperty, StyleValue)],
    ) {
        for (property, value) in entries {
            if !self.originals.contains_key(property) {
                let original = host.read_style(node, *property);
                self.originals.insert(*property, original);
            }
            host.write_style(node, *property, value);
            self.applied.insert(*property, value.clone());
        }
    }

    /// Restore every recorded original value and empty the patch.
    pub fn clear<H: Host>(&mut self, host: &mut H, node: &H::Node) {
        while let Some((property, original)) = self.originals.pop_first() {
            host.write_style(node, property, &original);
        }
        self.applied.clear();
    }

    /// Temporarily write the original values back without forgetting the
    /// overrides, so the node can be measured at its true layout position.
    pub fn lift<H: Host>(&self, host: &mut H, node: &H::Node) {
        for (property, original) in &self.originals {
            host.write_style(node, *property, original);
        }
    }

    /// Re-establish the overrides removed by `lift`.
    pub fn reapply<H: Host>(&self, host: &mut H, node: &H::Node) {
        for (property, value) in &self.applied {
            host.write_style(node, *property, value);
        }
    }

    /// Drop all bookkeeping without touching the host.
    pub fn forget(&mut self) {
        self.applied.clear();
        self.originals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::harness::TestHost;

    fn node() -> String {
        "node".to_string()
    }

    #[test]
    fn test_apply_then_clear_restores_originals() {
        let mut host = TestHost::new();
        host.set_rect(&node(), Rect::ZERO);
        let mut patch = StylePatch::new();

        patch.apply(
            &mut host,
            &node(),
            &[
                (StyleProperty::Layer, StyleValue::Layer(1)),
                (StyleProperty::TransitionDuration, StyleValue::DurationMs(300.0)),
            ],
        );
        assert_eq!(host.style_of(&node(), StyleProperty::Layer), StyleValue::Layer(1));

        patch.clear(&mut host, &node());
        assert_eq!(host.style_of(&node(), StyleProperty::Layer), StyleValue::Initial);
        assert_eq!(
            host.style_of(&node(), StyleProperty::TransitionDuration),
            StyleValue::Initial
        );
        assert!(patch.is_empty());
    }

    #[test]
    fn test_nested_overwrites_keep_first_original() {
        let mut host = TestHost::new();
        // The node carries a pre-existing layer override that must survive.
        host.write_style(&node(), StyleProperty::Layer, &StyleValue::Layer(5));
        let mut patch = StylePatch::new();

        // Patch P, then a second overlapping write Q on the same property.
        patch.apply(&mut host, &node(), &[(StyleProperty::Layer, StyleValue::Layer(1))]);
        patch.apply(&mut host, &node(), &[(StyleProperty::Layer, StyleValue::Layer(2))]);
        assert_eq!(host.style_of(&node(), StyleProperty::Layer), StyleValue::Layer(2));

        // Clearing restores the pre-P value, not an intermediate one.
        patch.clear(&mut host, &node());
        assert_eq!(host.style_of(&node(), StyleProperty::Layer), StyleValue::Layer(5));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut host = TestHost::new();
        let mut patch = StylePatch::new();

        patch.apply(&mut host, &node(), &[(StyleProperty::Layer, StyleValue::Layer(1))]);
        patch.clear(&mut host, &node());
        let writes_after_first_clear = host.write_count();
        patch.clear(&mut host, &node());
        assert_eq!(host.write_count(), writes_after_first_clear);
    }

    #[test]
    fn test_lift_and_reapply() {
        let mut host = TestHost::new();
        let mut patch = StylePatch::new();
        let delta = Rect::new(0.0, 100.0, 10.0, 10.0)
            .delta_transform(&Rect::new(0.0, 300.0, 10.0, 10.0));

        patch.apply(
            &mut host,
            &node(),
            &[(StyleProperty::Transform, StyleValue::Transform(delta))],
        );

        patch.lift(&mut host, &node());
        assert_eq!(host.style_of(&node(), StyleProperty::Transform), StyleValue::Initial);

        patch.reapply(&mut host, &node());
        assert_eq!(
            host.style_of(&node(), StyleProperty::Transform),
            StyleValue::Transform(delta)
        );

        // Lift/reapply must not lose the restore bookkeeping.
        patch.clear(&mut host, &node());
        assert_eq!(host.style_of(&node(), StyleProperty::Transform), StyleValue::Initial);
    }
}
