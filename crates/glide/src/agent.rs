//! The animation coordinator.
//!
//! `AnimationAgent` owns per-key state for every registered node: the last
//! known rectangle, the in-flight timer (the animation handle), the applied
//! style patch and the node's animation strategies. It orchestrates
//! measurement, strategy invocation, cancellation and resize-triggered
//! re-measurement, pooling timers and option bundles across animation
//! lifecycles.
//!
//! Repositioning and resize handling are deferred: `request_reposition` and
//! `schedule_resize` only enqueue work, and the host flushes the queue once
//! per update cycle via [`AnimationAgent::flush`] after its own update has
//! fully applied. Duplicate requests for a key within one cycle collapse to
//! the last-enqueued occurrence.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{AnimError, Result};
use crate::geometry::Rect;
use crate::host::Host;
use crate::options::{AnimateFn, AnimateOptions};
use crate::pool::Pool;
use crate::style::StylePatch;
use crate::timer::{AnimateTimer, TimerTick};

/// Duration of the default eased transition, in milliseconds.
pub const DEFAULT_TRANSITION_MS: f64 = 300.0;

/// Per-node animation strategies supplied at registration.
pub struct NodeHooks<H: Host> {
    /// Invoked whenever the node's measured rectangle changes across an
    /// update cycle. Defaults to a [`DEFAULT_TRANSITION_MS`] eased
    /// transition from the old position's offset to zero.
    pub animate: Option<AnimateFn<H>>,
    /// Invoked when the node's rectangle is recorded for the first time.
    /// Defaults to no animation.
    pub animate_in: Option<AnimateFn<H>>,
}

impl<H: Host> Default for NodeHooks<H> {
    fn default() -> Self {
        Self {
            animate: None,
            animate_in: None,
        }
    }
}

impl<H: Host> Clone for NodeHooks<H> {
    fn clone(&self) -> Self {
        Self {
            animate: self.animate.clone(),
            animate_in: self.animate_in.clone(),
        }
    }
}

impl<H: Host> NodeHooks<H> {
    /// Hooks with no custom strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reposition strategy.
    pub fn with_animate(
        mut self,
        strategy: impl Fn(&AnimateOptions) -> Result<crate::timer::TimerPlan<H>> + 'static,
    ) -> Self {
        self.animate = Some(std::rc::Rc::new(strategy));
        self
    }

    /// Set the first-appearance strategy.
    pub fn with_animate_in(
        mut self,
        strategy: impl Fn(&AnimateOptions) -> Result<crate::timer::TimerPlan<H>> + 'static,
    ) -> Self {
        self.animate_in = Some(std::rc::Rc::new(strategy));
        self
    }
}

/// State owned exclusively by the agent for one identity key.
struct KeyEntry<H: Host> {
    /// Back-reference to the live node; the host owns node lifetime.
    node: Option<H::Node>,
    /// Most recent known on-screen rectangle.
    last_rect: Option<Rect>,
    /// The in-flight animation handle. A canceled timer is retained here so
    /// a defensive re-cancel can still read its frozen snapshot.
    active: Option<AnimateTimer<H>>,
    /// Style overrides this agent has applied to the node.
    patch: StylePatch,
    hooks: NodeHooks<H>,
}

impl<H: Host> KeyEntry<H> {
    fn new() -> Self {
        Self {
            node: None,
            last_rect: None,
            active: None,
            patch: StylePatch::new(),
            hooks: NodeHooks::default(),
        }
    }
}

/// Coordinates position-based animations for the keyed nodes registered
/// under it.
///
/// Single-threaded by design: cross-key isolation is structural (separate
/// map entries), not lock-based.
pub struct AnimationAgent<H: Host> {
    /// The coordinate origin for all child measurements.
    root: H::Node,
    root_rect: Option<Rect>,
    entries: HashMap<String, KeyEntry<H>>,
    /// Key registration order; resize re-measurement and frame stepping
    /// iterate in this order for determinism.
    order: Vec<String>,
    /// Keys with a reposition pending for the next flush, in enqueue order.
    pending: Vec<String>,
    resize_pending: bool,
    timer_pool: Pool<AnimateTimer<H>>,
    options_pool: Pool<AnimateOptions>,
}

impl<H: Host> AnimationAgent<H> {
    /// Create an agent rooted at the given node.
    pub fn new(root: H::Node) -> Self {
        Self {
            root,
            root_rect: None,
            entries: HashMap::new(),
            order: Vec::new(),
            pending: Vec::new(),
            resize_pending: false,
            timer_pool: Pool::new(),
            options_pool: Pool::new(),
        }
    }

    /// Record a keyed node as live. Does not trigger measurement; the
    /// registrant requests a reposition separately.
    pub fn register_node(&mut self, key: &str, node: H::Node, hooks: NodeHooks<H>) {
        let entry = self.entries.entry(key.to_string()).or_insert_with(|| {
            self.order.push(key.to_string());
            KeyEntry::new()
        });
        trace!(key, ?node, "register node");
        entry.node = Some(node);
        entry.hooks = hooks;
    }

    /// Forget a keyed node that is about to stop being live.
    ///
    /// A no-op unless `node` matches the currently registered reference,
    /// since unregistration can race the host's own teardown order. Any
    /// active animation is canceled; its snapshot is discarded here but
    /// stays frozen on the timer, so a new node arriving under the same key
    /// will re-cancel defensively and inherit the position then.
    pub fn unregister_node(&mut self, key: &str, node: &H::Node, now_ms: f64) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        if entry.node.as_ref() != Some(node) {
            return;
        }
        debug!(key, "unregister node");
        entry.node = None;
        if let Some(timer) = entry.active.as_mut() {
            let _ = timer.cancel(now_ms);
        }
        entry.patch.forget();
    }

    /// Remove this agent's style overrides from the node, immediately
    /// before the host changes its visual representation, so the upcoming
    /// layout and measurement are unperturbed by animation styling.
    pub fn before_node_update(&mut self, host: &mut H, key: &str) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        let Some(node) = entry.node.clone() else {
            return;
        };
        trace!(key, "clear patch before node update");
        entry.patch.clear(host, &node);
    }

    /// Request a measurement-and-animation pass for the key at the end of
    /// the current update cycle. Multiple requests within one cycle
    /// collapse to the last-enqueued occurrence.
    pub fn request_reposition(&mut self, key: &str) {
        if let Some(position) = self.pending.iter().position(|pending| pending == key) {
            self.pending.remove(position);
        }
        trace!(key, "reposition requested");
        self.pending.push(key.to_string());
    }

    /// Request a full re-measurement at the end of the current update
    /// cycle, after an external layout change (e.g. a viewport resize)
    /// may have shifted true positions underneath in-flight animations.
    pub fn schedule_resize(&mut self) {
        self.resize_pending = true;
    }

    /// The coalesced end-of-cycle tick: runs the pending resize
    /// re-measurement, then every pending reposition in enqueue order.
    pub fn flush(&mut self, host: &mut H, now_ms: f64) -> Result<()> {
        if self.resize_pending {
            self.resize_pending = false;
            self.remeasure_all(host);
        }
        let pending = std::mem::take(&mut self.pending);
        for key in &pending {
            self.reposition(host, key, now_ms)?;
        }
        Ok(())
    }

    fn reposition(&mut self, host: &mut H, key: &str, now_ms: f64) -> Result<()> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Ok(());
        };
        let Some(node) = entry.node.clone() else {
            return Ok(());
        };

        let Some(last_rect) = entry.last_rect else {
            // First sighting: record the rectangle and optionally animate in.
            let rect = host.measure_rect(&node, &self.root);
            debug!(key, ?rect, "record initial rect");
            entry.last_rect = Some(rect);
            if let Some(strategy) = entry.hooks.animate_in.clone() {
                let mut options = self.options_pool.checkout();
                options.prime(rect, rect);
                let plan = strategy(&options);
                self.options_pool.give_back(options);
                let mut timer = self.timer_pool.checkout();
                timer.begin(plan?);
                entry.active = Some(timer);
            }
            return Ok(());
        };

        // A new animation must start where the previous one currently is,
        // never where it started, so cancel first and inherit the snapshot.
        let start = match entry.active.take() {
            Some(mut timer) => {
                let snapshot = timer.cancel(now_ms);
                self.timer_pool.give_back(timer);
                snapshot.unwrap_or(last_rect)
            }
            None => last_rect,
        };

        let current = host.measure_rect(&node, &self.root);
        entry.last_rect = Some(current);
        if start == current {
            // Cancellation dropped the old plan's cleanup phase along with
            // the rest of it, so any styling it applied is restored here.
            trace!(key, "rect unchanged, skipping animation");
            entry.patch.clear(host, &node);
            return Ok(());
        }
        debug!(key, ?start, ?current, "reposition");

        let strategy = entry.hooks.animate.clone();
        let mut options = self.options_pool.checkout();
        options.prime(start, current);
        let plan = match &strategy {
            Some(strategy) => strategy(&options),
            None => Ok(options.transition_from(start, current, DEFAULT_TRANSITION_MS)),
        };
        self.options_pool.give_back(options);

        let mut timer = self.timer_pool.checkout();
        timer.begin(plan?);
        entry.active = Some(timer);
        Ok(())
    }

    /// Re-measure the root and every registered node, in registration
    /// order, with animation styling temporarily lifted so the recorded
    /// rectangles track ground truth rather than animated positions.
    fn remeasure_all(&mut self, host: &mut H) {
        self.root_rect = Some(host.measure_rect(&self.root, &self.root));
        debug!(root_rect = ?self.root_rect, "resize re-measurement");
        for key in &self.order {
            let Some(entry) = self.entries.get_mut(key) else {
                continue;
            };
            let Some(node) = entry.node.clone() else {
                continue;
            };
            entry.patch.lift(host, &node);
            entry.last_rect = Some(host.measure_rect(&node, &self.root));
            entry.patch.reapply(host, &node);
        }
    }

    /// Step every in-flight animation for one repaint.
    ///
    /// Completed timers are returned to the pool and their handles cleared.
    /// A canceled-timer signal surfacing here is the expected outcome of an
    /// out-of-band cancellation and is swallowed; any other strategy error
    /// propagates to the host untouched.
    pub fn advance_frame(&mut self, host: &mut H, now_ms: f64) -> Result<()> {
        for key in &self.order {
            let Some(entry) = self.entries.get_mut(key) else {
                continue;
            };
            let Some(node) = entry.node.clone() else {
                continue;
            };
            let Some(timer) = entry.active.as_mut() else {
                continue;
            };
            if !timer.is_running() {
                continue;
            }
            match timer.tick(host, &node, &mut entry.patch, now_ms) {
                Ok(TimerTick::Pending) => {}
                Ok(TimerTick::Completed) => {
                    trace!(key, "animation completed");
                    if let Some(timer) = entry.active.take() {
                        self.timer_pool.give_back(timer);
                    }
                }
                Err(AnimError::Canceled) => {
                    if let Some(timer) = entry.active.take() {
                        self.timer_pool.give_back(timer);
                    }
                }
                Err(error) => {
                    if let Some(timer) = entry.active.take() {
                        self.timer_pool.give_back(timer);
                    }
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Returns true while any animation still wants repaints. The host
    /// should keep scheduling frames (and calling
    /// [`advance_frame`](Self::advance_frame)) while this holds.
    pub fn needs_frames(&self) -> bool {
        self.entries
            .values()
            .any(|entry| entry.active.as_ref().is_some_and(AnimateTimer::is_running))
    }

    /// The last recorded rectangle for a key, if any.
    pub fn last_rect(&self, key: &str) -> Option<Rect> {
        self.entries.get(key).and_then(|entry| entry.last_rect)
    }

    /// The agent root's most recently measured rectangle.
    pub fn root_rect(&self) -> Option<Rect> {
        self.root_rect
    }

    /// Returns true while an animation is in flight for the key.
    pub fn is_animating(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .and_then(|entry| entry.active.as_ref())
            .is_some_and(AnimateTimer::is_running)
    }

    /// Number of idle timers currently pooled.
    pub fn pooled_timers(&self) -> usize {
        self.timer_pool.idle()
    }

    /// Number of idle option bundles currently pooled.
    pub fn pooled_options(&self) -> usize {
        self.options_pool.idle()
    }
}
