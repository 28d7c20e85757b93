// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DefaultInterruptBehavior, INTERRUPT_EXIT_CODE, RunningFlag, StdMutex};
use std::{fmt, sync::Arc};

/// Called when the session shuts down. See [`ShutdownBridge::stop()`] and
/// [`ShutdownBridge::handle_interrupt()`].
pub type ExitCallback = Arc<dyn Fn() + Send + Sync>;

/// Lifecycle of the interrupt path. It only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum BridgeState {
    /// Waiting for `SIGINT`.
    Armed,
    /// `SIGINT` was received and the shutdown sequence has run.
    Triggered,
    /// The terminal was restored, and process termination was requested.
    Terminated,
}

/// Connects the ways a session can end to the [`RunningFlag`] and the caller's
/// [`ExitCallback`]. It is handed to both the background task and the line handler, so
/// either can end the session with [`Self::stop()`].
///
/// You can safely clone this struct, since it only contains `Arc`s.
#[derive(Clone)]
pub struct ShutdownBridge {
    running: RunningFlag,
    on_exit: Option<ExitCallback>,
    default_interrupt: DefaultInterruptBehavior,
    state: Arc<StdMutex<BridgeState>>,
}

impl fmt::Debug for ShutdownBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownBridge")
            .field("running", &self.running.get())
            .field("has_on_exit", &self.on_exit.is_some())
            .field("default_interrupt", &self.default_interrupt)
            .field("state", &self.get_state())
            .finish()
    }
}

impl ShutdownBridge {
    #[must_use]
    pub fn new(
        running: RunningFlag,
        on_exit: Option<ExitCallback>,
        default_interrupt: DefaultInterruptBehavior,
    ) -> Self {
        Self {
            running,
            on_exit,
            default_interrupt,
            state: Arc::new(StdMutex::new(BridgeState::Armed)),
        }
    }

    #[must_use]
    pub fn running(&self) -> &RunningFlag { &self.running }

    #[must_use]
    pub fn is_running(&self) -> bool { self.running.is_running() }

    #[must_use]
    pub fn default_interrupt(&self) -> &DefaultInterruptBehavior {
        &self.default_interrupt
    }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    #[must_use]
    pub fn get_state(&self) -> BridgeState { *self.state.lock().unwrap() }

    /// Clear the [`RunningFlag`] and invoke the exit callback, if there is one. Calling
    /// this more than once invokes the callback each time.
    pub fn stop(&self) {
        tracing::info!(message = "session stop requested");
        self.running.stop();
        if let Some(on_exit) = &self.on_exit {
            on_exit();
        }
    }

    /// The part of the interrupt path that doesn't touch the terminal or the process, in
    /// this order:
    /// 1. Move to [`BridgeState::Triggered`].
    /// 2. Put back the platform's default `SIGINT` behavior.
    /// 3. [`Self::stop()`].
    ///
    /// Returns the exit status the process should terminate with.
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    pub fn handle_interrupt(&self) -> i32 {
        *self.state.lock().unwrap() = BridgeState::Triggered;
        tracing::info!(message = "interrupt received", state = %BridgeState::Triggered);
        self.default_interrupt.restore();
        self.stop();
        INTERRUPT_EXIT_CODE
    }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    pub fn mark_terminated(&self) { *self.state.lock().unwrap() = BridgeState::Terminated; }
}
