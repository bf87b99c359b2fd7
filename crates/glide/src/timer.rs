//! The cancelable animation sequence primitive.
//!
//! An [`AnimateTimer`] runs a [`TimerPlan`]: an ordered chain of suspend
//! points that lets a multi-step animation read as sequential code while
//! remaining safely interruptible. The host's repaint loop drives the timer
//! through [`AnimateTimer::tick`]; out-of-band cancellation freezes a
//! caller-registered "current state" snapshot and is available to the
//! canceler synchronously.
//!
//! # Phases
//!
//! - `frame(step)` — suspends until the next repaint, then runs `step`; used
//!   to force a layout flush between style writes.
//! - `wait(ms)` — suspends for a fixed duration; used to wait out a
//!   host-eased transition.
//! - `step_loop(step)` — runs `step` once per repaint until it reports a
//!   progress of 1.0 or more; used for manually driven interpolation.
//! - `run(step)` — runs `step` immediately when reached, without consuming a
//!   repaint; used for cleanup that must not wait another frame.
//!
//! Each phase can re-register a more accurate snapshot function via
//! [`StepCx::set_snapshot`], so cancellation always yields the best
//! available approximation of the node's true position.

use std::collections::VecDeque;

use crate::error::Result;
use crate::geometry::Rect;
use crate::host::Host;
use crate::pool::PoolItem;
use crate::style::{StylePatch, StyleProperty, StyleValue};

/// Computes the best-available current position at cancellation time.
/// Receives the host clock in milliseconds.
pub type SnapshotFn = Box<dyn Fn(f64) -> Rect>;

/// Context handed to every phase body.
///
/// Style mutation goes through the key's [`StylePatch`] so overlapping
/// animations on the same node cannot corrupt each other's restore
/// bookkeeping.
pub struct StepCx<'a, H: Host> {
    /// The host rendering tree.
    pub host: &'a mut H,
    /// The node this animation is driving.
    pub node: &'a H::Node,
    /// Host clock for this repaint, in milliseconds.
    pub now_ms: f64,
    patch: &'a mut StylePatch,
    snapshot: &'a mut Option<SnapshotFn>,
}

impl<H: Host> StepCx<'_, H> {
    /// Apply style overrides through the key's patch.
    pub fn apply_style(&mut self, entries: &[(StyleProperty, StyleValue)]) {
        self.patch.apply(self.host, self.node, entries);
    }

    /// Restore every style property this key's patch has overridden.
    pub fn clear_style(&mut self) {
        self.patch.clear(self.host, self.node);
    }

    /// Register (or replace) the snapshot function used if cancellation
    /// occurs from this point forward.
    pub fn set_snapshot(&mut self, snapshot: impl Fn(f64) -> Rect + 'static) {
        *self.snapshot = Some(Box::new(snapshot));
    }
}

type StepFn<H> = Box<dyn FnMut(&mut StepCx<'_, H>) -> Result<()>>;
type LoopFn<H> = Box<dyn FnMut(&mut StepCx<'_, H>) -> Result<f64>>;

enum Phase<H: Host> {
    Frame(StepFn<H>),
    Run(StepFn<H>),
    Wait {
        duration_ms: f64,
        started_at: Option<f64>,
    },
    Loop(LoopFn<H>),
}

/// An ordered chain of suspend points, built by an animation strategy and
/// executed by an [`AnimateTimer`].
pub struct TimerPlan<H: Host> {
    phases: VecDeque<Phase<H>>,
}

impl<H: Host> Default for TimerPlan<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> TimerPlan<H> {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self {
            phases: VecDeque::new(),
        }
    }

    /// Suspend until the next repaint, then run `step`.
    pub fn frame(mut self, step: impl FnMut(&mut StepCx<'_, H>) -> Result<()> + 'static) -> Self {
        self.phases.push_back(Phase::Frame(Box::new(step)));
        self
    }

    /// Run `step` immediately when reached, without consuming a repaint.
    pub fn run(mut self, step: impl FnMut(&mut StepCx<'_, H>) -> Result<()> + 'static) -> Self {
        self.phases.push_back(Phase::Run(Box::new(step)));
        self
    }

    /// Suspend for a fixed duration in milliseconds.
    pub fn wait(mut self, duration_ms: f64) -> Self {
        self.phases.push_back(Phase::Wait {
            duration_ms,
            started_at: None,
        });
        self
    }

    /// Run `step` once per repaint until it reports a progress of 1.0 or
    /// more on a `[0, 1]` progress scale.
    pub fn step_loop(
        mut self,
        step: impl FnMut(&mut StepCx<'_, H>) -> Result<f64> + 'static,
    ) -> Self {
        self.phases.push_back(Phase::Loop(Box::new(step)));
        self
    }

    /// Number of phases in the plan.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns true when the plan has no phases.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Lifecycle state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Pristine; no plan loaded. Pool-resident timers are always idle.
    Idle,
    /// A plan is loaded and being stepped.
    Running,
    /// The plan ran to completion.
    Completed,
    /// The sequence was terminated out of band; the frozen snapshot is
    /// retained for defensive re-cancellation.
    Canceled,
}

/// Outcome of stepping a running timer once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The sequence is suspended and wants further repaints.
    Pending,
    /// The sequence ran its final phase; the timer is eligible for reuse.
    Completed,
}

/// A cancelable, resumable animation sequence.
///
/// State machine: `Idle → Running → {Completed | Canceled}`. Once completed
/// or canceled the timer holds no phase closures and is eligible for pool
/// reuse.
pub struct AnimateTimer<H: Host> {
    state: TimerState,
    phases: VecDeque<Phase<H>>,
    snapshot: Option<SnapshotFn>,
    frozen: Option<Rect>,
}

impl<H: Host> Default for AnimateTimer<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> AnimateTimer<H> {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            phases: VecDeque::new(),
            snapshot: None,
            frozen: None,
        }
    }

    /// Load a plan and start running it. The first phase executes on the
    /// next [`tick`](Self::tick).
    pub fn begin(&mut self, plan: TimerPlan<H>) {
        self.phases = plan.phases;
        self.snapshot = None;
        self.frozen = None;
        self.state = TimerState::Running;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns true while the sequence still wants repaints.
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Step the sequence for one repaint.
    ///
    /// At most one repaint-consuming phase (`frame` or `step_loop` body)
    /// executes per call; `run` phases and elapsed `wait`s are drained in
    /// the same call. Errors from phase bodies propagate unswallowed; the
    /// caller decides what to do with the half-run sequence.
    pub fn tick(
        &mut self,
        host: &mut H,
        node: &H::Node,
        patch: &mut StylePatch,
        now_ms: f64,
    ) -> Result<TimerTick> {
        if self.state != TimerState::Running {
            return Ok(TimerTick::Pending);
        }

        let mut frame_consumed = false;
        loop {
            let Some(mut phase) = self.phases.pop_front() else {
                self.state = TimerState::Completed;
                return Ok(TimerTick::Completed);
            };
            match &mut phase {
                Phase::Run(step) => {
                    let mut cx = StepCx {
                        host: &mut *host,
                        node,
                        now_ms,
                        patch: &mut *patch,
                        snapshot: &mut self.snapshot,
                    };
                    step(&mut cx)?;
                }
                Phase::Frame(step) => {
                    if frame_consumed {
                        self.phases.push_front(phase);
                        return Ok(TimerTick::Pending);
                    }
                    let mut cx = StepCx {
                        host: &mut *host,
                        node,
                        now_ms,
                        patch: &mut *patch,
                        snapshot: &mut self.snapshot,
                    };
                    step(&mut cx)?;
                    frame_consumed = true;
                }
                Phase::Wait {
                    duration_ms,
                    started_at,
                } => {
                    let t0 = *started_at.get_or_insert(now_ms);
                    if now_ms - t0 < *duration_ms {
                        self.phases.push_front(phase);
                        return Ok(TimerTick::Pending);
                    }
                }
                Phase::Loop(step) => {
                    if frame_consumed {
                        self.phases.push_front(phase);
                        return Ok(TimerTick::Pending);
                    }
                    let mut cx = StepCx {
                        host: &mut *host,
                        node,
                        now_ms,
                        patch: &mut *patch,
                        snapshot: &mut self.snapshot,
                    };
                    let progress = step(&mut cx)?;
                    frame_consumed = true;
                    if progress < 1.0 {
                        self.phases.push_front(phase);
                        return Ok(TimerTick::Pending);
                    }
                }
            }
        }
    }

    /// Terminate the sequence and return the most recently registered
    /// snapshot, evaluated at `now_ms`.
    ///
    /// The snapshot is frozen: canceling an already-canceled timer returns
    /// the same rectangle, which lets a superseding animation inherit the
    /// position no matter how many parties canceled defensively in between.
    /// Returns `None` if the sequence never registered a snapshot or had
    /// already completed.
    pub fn cancel(&mut self, now_ms: f64) -> Option<Rect> {
        match self.state {
            TimerState::Running => {
                let frozen = self.snapshot.as_ref().map(|snapshot| snapshot(now_ms));
                self.frozen = frozen;
                self.phases.clear();
                self.state = TimerState::Canceled;
                frozen
            }
            TimerState::Canceled => self.frozen,
            TimerState::Idle | TimerState::Completed => None,
        }
    }
}

impl<H: Host> PoolItem for AnimateTimer<H> {
    fn fresh() -> Self {
        Self::new()
    }

    fn reset(&mut self) {
        self.phases.clear();
        self.snapshot = None;
        self.frozen = None;
        self.state = TimerState::Idle;
    }
}
