// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AsyncStdioError, CommonResult};
use signal_hook::{SigId, consts::SIGINT};
use std::sync::{Arc,
                atomic::{AtomicBool, Ordering}};

/// The platform's default reaction to `SIGINT` (terminate the process), held as an
/// explicit value so that putting it back is a visible step of the shutdown sequence.
///
/// Once the [`crate::InterruptWatcher`] is armed, `SIGINT` no longer kills the process.
/// [`Self::try_register()`] installs a handler that runs the default action only after
/// [`Self::restore()`] has been called. From then on a second <kbd>Ctrl+C</kbd> is
/// handled by the platform, not by the bridge.
///
/// You can safely clone this struct, since it only contains an `Arc`.
#[derive(Debug, Clone)]
pub struct DefaultInterruptBehavior {
    is_restored: Arc<AtomicBool>,
    sig_id: Option<SigId>,
}

impl DefaultInterruptBehavior {
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::SignalRegistration`] if the signal handler can't be
    /// installed.
    pub fn try_register() -> CommonResult<Self> {
        let is_restored = Arc::new(AtomicBool::new(false));
        let sig_id =
            signal_hook::flag::register_conditional_default(SIGINT, is_restored.clone())
                .map_err(AsyncStdioError::SignalRegistration)?;
        Ok(Self {
            is_restored,
            sig_id: Some(sig_id),
        })
    }

    /// Not connected to any signal. [`Self::restore()`] only flips the flag. Used by
    /// sessions that don't listen for `SIGINT`, and by tests.
    #[must_use]
    pub fn new_detached() -> Self {
        Self {
            is_restored: Arc::new(AtomicBool::new(false)),
            sig_id: None,
        }
    }

    #[must_use]
    pub fn is_registered(&self) -> bool { self.sig_id.is_some() }

    /// Let the next `SIGINT` terminate the process the way it normally would.
    pub fn restore(&self) { self.is_restored.store(true, Ordering::SeqCst); }

    #[must_use]
    pub fn is_restored(&self) -> bool { self.is_restored.load(Ordering::SeqCst) }
}
