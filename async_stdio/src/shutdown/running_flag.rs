// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::StdMutex;
use std::{sync::{Arc, Condvar},
          time::Duration};

/// Whether the session is still going. This is returned instead of a bare `bool` so call
/// sites read like what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Liveness {
    #[default]
    Running,
    Stopped,
}

/// Cooperative cancellation token shared by the foreground loop, the background task,
/// and the shutdown path. It starts out [`Liveness::Running`], and once it is
/// [`Liveness::Stopped`] it stays that way.
///
/// You can safely clone this struct, since it only contains an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RunningFlag {
    inner: Arc<(StdMutex<Liveness>, Condvar)>,
}

impl RunningFlag {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    #[must_use]
    pub fn get(&self) -> Liveness { *self.inner.0.lock().unwrap() }

    #[must_use]
    pub fn is_running(&self) -> bool { self.get() == Liveness::Running }

    /// Clear the flag and wake up everyone blocked in [`Self::sleep_while_running()`].
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    pub fn stop(&self) {
        let (liveness, condvar) = &*self.inner;
        *liveness.lock().unwrap() = Liveness::Stopped;
        condvar.notify_all();
    }

    /// Sleep for `duration`, or until [`Self::stop()`] is called, whichever comes first.
    /// Returns the liveness at the time of waking up. Use this in a background task
    /// instead of [`std::thread::sleep()`], so that it exits promptly.
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    pub fn sleep_while_running(&self, duration: Duration) -> Liveness {
        let (liveness, condvar) = &*self.inner;
        let guard = liveness.lock().unwrap();
        let (guard, _timeout_result) = condvar
            .wait_timeout_while(guard, duration, |it| *it == Liveness::Running)
            .unwrap();
        *guard
    }
}
