//! Lifecycle binding between a host node and the agent.
//!
//! `Animated` is a thin adapter: the host rendering tree calls it on each
//! lifecycle event of a registered visual node, and it forwards the event
//! to the coordinator. It holds no animation state of its own.

use crate::agent::AnimationAgent;
use crate::agent::NodeHooks;
use crate::host::Host;

/// Registers a keyed node under an agent and forwards its lifecycle.
pub struct Animated<H: Host> {
    key: String,
    node: H::Node,
    hooks: NodeHooks<H>,
}

impl<H: Host> Animated<H> {
    /// Bind a node to an identity key. The key identifies the logical node
    /// across tree restructurings; the node reference may change.
    pub fn new(key: impl Into<String>, node: H::Node) -> Self {
        Self {
            key: key.into(),
            node,
            hooks: NodeHooks::default(),
        }
    }

    /// Supply custom animation strategies.
    pub fn with_hooks(mut self, hooks: NodeHooks<H>) -> Self {
        self.hooks = hooks;
        self
    }

    /// The identity key this binding registers under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The node became live: register it and request the initial
    /// measurement pass.
    pub fn mounted(&self, agent: &mut AnimationAgent<H>) {
        agent.register_node(&self.key, self.node.clone(), self.hooks.clone());
        agent.request_reposition(&self.key);
    }

    /// The node's visual representation is about to change: strip the
    /// agent's styling so layout and measurement are unperturbed.
    pub fn will_update(&self, agent: &mut AnimationAgent<H>, host: &mut H) {
        agent.before_node_update(host, &self.key);
    }

    /// The node's visual representation changed: request a reposition.
    pub fn updated(&self, agent: &mut AnimationAgent<H>) {
        agent.request_reposition(&self.key);
    }

    /// The node is about to stop being live.
    pub fn will_unmount(&self, agent: &mut AnimationAgent<H>, now_ms: f64) {
        agent.unregister_node(&self.key, &self.node, now_ms);
    }
}
