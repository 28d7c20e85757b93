// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGINT

use crate::{AsyncStdioError, CommonResult, INTERRUPT_WATCHER_THREAD_NAME,
            ShutdownBridge, TerminalRestorer};
use signal_hook::{consts::SIGINT, iterator::{Handle, Signals}};
use std::thread::{self, JoinHandle};

/// Dedicated thread that blocks until `SIGINT` arrives, then runs the interrupt path:
/// 1. [`ShutdownBridge::handle_interrupt()`] (default behavior back, flag cleared, exit
///    callback invoked).
/// 2. Restore the terminal's original attributes. The foreground thread may be blocked in
///    a raw mode read, and its [`crate::RawModeGuard`] won't get to run.
/// 3. Call `terminate` with the exit status. In production this is
///    [`std::process::exit()`].
///
/// Only the first `SIGINT` is handled here. After that the default behavior is back, so
/// a second one terminates the process directly.
#[allow(missing_debug_implementations)]
pub struct InterruptWatcher {
    signals_handle: Handle,
    join_handle: Option<JoinHandle<()>>,
}

impl InterruptWatcher {
    /// # Errors
    ///
    /// - [`AsyncStdioError::SignalRegistration`] if `SIGINT` can't be subscribed to.
    /// - [`AsyncStdioError::ThreadSpawn`] if the watcher thread can't be started.
    pub fn try_spawn<F>(
        bridge: ShutdownBridge,
        restorer: TerminalRestorer,
        terminate: F,
    ) -> CommonResult<Self>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        let mut signals =
            Signals::new([SIGINT]).map_err(AsyncStdioError::SignalRegistration)?;
        let signals_handle = signals.handle();

        let join_handle = thread::Builder::new()
            .name(INTERRUPT_WATCHER_THREAD_NAME.into())
            .spawn(move || {
                // `None` means the watcher was disarmed.
                if signals.forever().next().is_none() {
                    return;
                }
                let exit_code = bridge.handle_interrupt();
                if let Err(error) = restorer.restore() {
                    tracing::warn!(
                        message = "failed to restore terminal after interrupt",
                        error = %error
                    );
                }
                bridge.mark_terminated();
                terminate(exit_code);
            })
            .map_err(|source| AsyncStdioError::ThreadSpawn {
                name: INTERRUPT_WATCHER_THREAD_NAME.into(),
                source,
            })?;

        Ok(Self {
            signals_handle,
            join_handle: Some(join_handle),
        })
    }

    /// Stop listening for `SIGINT` and wait for the watcher thread to exit.
    pub fn disarm(mut self) { self.close_and_join(); }

    fn close_and_join(&mut self) {
        self.signals_handle.close();
        if let Some(join_handle) = self.join_handle.take()
            && join_handle.join().is_err()
        {
            tracing::warn!(message = "interrupt watcher thread panicked");
        }
    }
}

impl Drop for InterruptWatcher {
    fn drop(&mut self) { self.close_and_join(); }
}
