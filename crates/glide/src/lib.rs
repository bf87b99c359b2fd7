//! Coordinator for position-based (FLIP) animations over a host rendering
//! tree.
//!
//! Nodes register under an [`AnimationAgent`] with a stable identity key.
//! Whenever a node's rendered position changes across an update cycle, the
//! agent measures the old and new on-screen rectangles and drives an
//! animation that visually interpolates between them, so the viewer sees
//! continuous motion instead of a jump cut.
//!
//! This crate provides:
//! - **Rectangle geometry**: interpolation and transform-delta computation
//! - **Cancelable timed sequences**: multi-step animations as readable
//!   sequential code that stays safely interruptible
//! - **Canned strategies**: manual per-frame interpolation and host-eased
//!   transitions
//! - **Object pooling**: allocation-free animation lifecycles on the
//!   per-frame hot path
//!
//! # Architecture
//!
//! ```text
//! AnimationAgent (per-key state, pools, pending queue)
//!   ├── AnimateTimer (cancelable phase sequence, snapshot on cancel)
//!   ├── AnimateOptions (pooled strategy parameter bundle)
//!   └── StylePatch (recorded, restorable style overrides)
//!
//! Animated (binding shim)
//!   └── forwards host lifecycle events to the agent
//!
//! Host (trait: measurement, style mutation, node identity)
//!   └── drives flush() per update cycle and advance_frame() per repaint
//! ```
//!
//! The coordinator does not perform layout and does not diff tree
//! structure; it guarantees correctness of positions, cancellation and
//! style cleanup even when the host's rendering cycle is congested.
//!
//! # Example
//!
//! ```
//! use glide::agent::{AnimationAgent, NodeHooks};
//! use glide::geometry::Rect;
//! use glide::harness::TestHost;
//!
//! let mut host = TestHost::new();
//! host.set_rect("row", Rect::new(0.0, 100.0, 200.0, 40.0));
//!
//! let mut agent: AnimationAgent<TestHost> = AnimationAgent::new("root".to_string());
//! agent.register_node("row", "row".to_string(), NodeHooks::default());
//! agent.request_reposition("row");
//! agent.flush(&mut host, 0.0).unwrap();
//!
//! // The row moves; the next flush starts a 300ms eased slide.
//! host.set_rect("row", Rect::new(0.0, 300.0, 200.0, 40.0));
//! agent.request_reposition("row");
//! agent.flush(&mut host, 10.0).unwrap();
//! assert!(agent.needs_frames());
//! ```

pub mod agent;
pub mod binding;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod harness;
pub mod host;
pub mod options;
pub mod pool;
pub mod style;
pub mod timer;

pub use agent::{AnimationAgent, NodeHooks, DEFAULT_TRANSITION_MS};
pub use binding::Animated;
pub use easing::EasingFunction;
pub use error::{AnimError, Result};
pub use geometry::{Interpolate, Rect, TransformDelta};
pub use host::Host;
pub use options::{AnimateFn, AnimateOptions};
pub use pool::{Pool, PoolItem};
pub use style::{StylePatch, StyleProperty, StyleValue};
pub use timer::{AnimateTimer, SnapshotFn, StepCx, TimerPlan, TimerState, TimerTick};
