//! Frame loop ownership: a [`Controller`] drives one engine from a host
//! [`FrameScheduler`].
//!
//! The host calls back once per requested frame. The controller runs exactly
//! one engine step per callback and only then requests the next frame, so
//! steps never overlap. Stopping cancels the pending request; a callback that
//! still arrives for a cancelled or superseded handle is ignored.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::input::Input;
use std::collections::VecDeque;

/// Opaque id of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// A host clock that can call back on the next frame.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError>;
    fn cancel_frame(&mut self, handle: FrameHandle) -> Result<(), EngineError>;
}

/// Loop state of a [`Controller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Never started.
    Idle,
    /// A frame has been requested and not yet delivered.
    Running(FrameHandle),
    Stopped,
}

/// Owns an engine and its frame loop.
pub struct Controller<E> {
    engine: E,
    state: LoopState,
    frames: u64,
}

impl<E: Engine> Controller<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Drops the loop state; any pending frame is left to the scheduler.
    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// The frame the loop is waiting on, if running.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match self.state {
            LoopState::Running(handle) => Some(handle),
            _ => None,
        }
    }

    /// Frames stepped so far, through either the loop or [`step_n`](Self::step_n).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Requests the first frame. A running loop keeps its pending frame.
    pub fn start<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Result<FrameHandle, EngineError> {
        if let LoopState::Running(handle) = self.state {
            return Ok(handle);
        }
        let handle = scheduler.request_frame()?;
        self.state = LoopState::Running(handle);
        Ok(handle)
    }

    /// Host callback for `fired`. Returns `true` if a step ran.
    ///
    /// On a step error the loop stops and the error is returned; no further
    /// frame is requested. If requesting the next frame fails the loop is
    /// left stopped, so `fired` cannot step the engine twice.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        fired: FrameHandle,
        scheduler: &mut S,
    ) -> Result<bool, EngineError> {
        if self.state != LoopState::Running(fired) {
            return Ok(false);
        }
        if let Err(e) = self.engine.step() {
            self.state = LoopState::Stopped;
            return Err(e);
        }
        self.frames += 1;
        self.state = LoopState::Stopped;
        let next = scheduler.request_frame()?;
        self.state = LoopState::Running(next);
        Ok(true)
    }

    /// Steps the engine `n` times without a host clock.
    pub fn step_n(&mut self, n: usize) -> Result<(), EngineError> {
        for _ in 0..n {
            self.engine.step()?;
            self.frames += 1;
        }
        Ok(())
    }

    /// Cancels the pending frame. Stopping an idle or stopped loop is a no-op.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> Result<(), EngineError> {
        if let LoopState::Running(handle) = self.state {
            self.state = LoopState::Stopped;
            scheduler.cancel_frame(handle)?;
        }
        Ok(())
    }

    /// Swaps in a fresh engine. The old loop is cancelled first; the new one
    /// is started only if the old one was running. Returns the old engine.
    pub fn replace<S: FrameScheduler + ?Sized>(
        &mut self,
        engine: E,
        scheduler: &mut S,
    ) -> Result<E, EngineError> {
        let was_running = self.is_running();
        self.stop(scheduler)?;
        let old = std::mem::replace(&mut self.engine, engine);
        self.frames = 0;
        self.state = LoopState::Idle;
        if was_running {
            self.start(scheduler)?;
        }
        Ok(old)
    }

    pub fn apply(&mut self, input: &Input) -> Result<(), EngineError> {
        self.engine.apply(input)
    }
}

/// Deterministic in-process scheduler. Requested frames queue up in order;
/// [`fire`](Self::fire) delivers the oldest one, like a host clock ticking.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest pending frame.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> impl Iterator<Item = FrameHandle> + '_ {
        self.pending.iter().copied()
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending.push_back(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> Result<(), EngineError> {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
        Ok(())
    }
}

/// Drives `controller` for `frames` host frames on a [`ManualScheduler`],
/// starting it if needed. Stops early if the loop stops.
pub fn run_frames<E: Engine>(
    controller: &mut Controller<E>,
    scheduler: &mut ManualScheduler,
    frames: usize,
) -> Result<(), EngineError> {
    controller.start(scheduler)?;
    for _ in 0..frames {
        match scheduler.fire() {
            Some(handle) => {
                controller.on_frame(handle, scheduler)?;
            }
            None => break,
        }
    }
    Ok(())
}
