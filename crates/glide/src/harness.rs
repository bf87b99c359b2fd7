//! Scripted host for tests and examples.
//!
//! `TestHost` implements [`Host`] over string node ids with scripted
//! rectangles, a write log and per-node measurement counters, so tests can
//! assert exactly what the coordinator measured and wrote without a real
//! rendering tree. Time is whatever the test passes in.

use std::collections::{BTreeMap, HashMap};

use crate::geometry::Rect;
use crate::host::Host;
use crate::style::{StyleProperty, StyleValue};

/// An in-memory [`Host`] with scripted measurements.
#[derive(Debug, Default)]
pub struct TestHost {
    rects: HashMap<String, Rect>,
    styles: HashMap<String, BTreeMap<StyleProperty, StyleValue>>,
    writes: Vec<(String, StyleProperty, StyleValue)>,
    measures: HashMap<String, usize>,
}

impl TestHost {
    /// Create an empty host. Unscripted nodes measure as [`Rect::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the rectangle a node will measure as.
    pub fn set_rect(&mut self, node: &str, rect: Rect) {
        self.rects.insert(node.to_string(), rect);
    }

    /// Current value of a style property on a node.
    pub fn style_of(&self, node: &str, property: StyleProperty) -> StyleValue {
        self.styles
            .get(node)
            .and_then(|styles| styles.get(&property))
            .cloned()
            .unwrap_or(StyleValue::Initial)
    }

    /// How many times a node has been measured.
    pub fn measure_count(&self, node: &str) -> usize {
        self.measures.get(node).copied().unwrap_or(0)
    }

    /// Every style write performed so far, in order.
    pub fn writes(&self) -> &[(String, StyleProperty, StyleValue)] {
        &self.writes
    }

    /// Total number of style writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl Host for TestHost {
    type Node = String;

    fn measure_rect(&mut self, node: &Self::Node, _root: &Self::Node) -> Rect {
        *self.measures.entry(node.clone()).or_insert(0) += 1;
        self.rects.get(node).copied().unwrap_or(Rect::ZERO)
    }

    fn read_style(&mut self, node: &Self::Node, property: StyleProperty) -> StyleValue {
        self.styles
            .get(node)
            .and_then(|styles| styles.get(&property))
            .cloned()
            .unwrap_or(StyleValue::Initial)
    }

    fn write_style(&mut self, node: &Self::Node, property: StyleProperty, value: &StyleValue) {
        self.writes.push((node.clone(), property, value.clone()));
        let styles = self.styles.entry(node.clone()).or_default();
        match value {
            StyleValue::Initial => {
                styles.remove(&property);
            }
            value => {
                styles.insert(property, value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscripted_node_measures_zero() {
        let mut host = TestHost::new();
        let rect = host.measure_rect(&"ghost".to_string(), &"root".to_string());
        assert_eq!(rect, Rect::ZERO);
        assert_eq!(host.measure_count("ghost"), 1);
    }

    #[test]
    fn test_write_initial_unsets() {
        let mut host = TestHost::new();
        let node = "n".to_string();
        host.write_style(&node, StyleProperty::Layer, &StyleValue::Layer(1));
        assert_eq!(host.style_of("n", StyleProperty::Layer), StyleValue::Layer(1));

        host.write_style(&node, StyleProperty::Layer, &StyleValue::Initial);
        assert_eq!(host.style_of("n", StyleProperty::Layer), StyleValue::Initial);
        assert_eq!(host.write_count(), 2);
    }
}
