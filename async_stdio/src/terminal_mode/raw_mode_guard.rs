// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CommonResult, TerminalModeController};

/// RAII guard returned by [`TerminalModeController::enter_raw()`]. The original terminal
/// attributes are restored when this guard is dropped, which covers early returns, `?`
/// propagation, and panics unwinding through the read loop.
///
/// On the success path prefer [`Self::restore()`], which reports a failure to restore.
/// `Drop` can only log it.
///
/// ```no_run
/// use r3bl_async_stdio::TerminalModeController;
///
/// let controller = TerminalModeController::capture_original().unwrap();
/// {
///     let raw_mode = controller.enter_raw().unwrap();
///     // Terminal is now in raw mode.
///     raw_mode.restore().unwrap();
/// }
/// ```
#[derive(Debug)]
#[must_use = "raw mode is restored as soon as this guard is dropped"]
pub struct RawModeGuard<'a> {
    controller: &'a TerminalModeController,
    is_restored: bool,
}

impl<'a> RawModeGuard<'a> {
    pub(crate) fn new(controller: &'a TerminalModeController) -> Self {
        Self {
            controller,
            is_restored: false,
        }
    }

    /// Restore the original attributes now and consume the guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the original attributes can't be applied. The guard does not
    /// try again when it is dropped.
    pub fn restore(mut self) -> CommonResult<()> {
        self.is_restored = true;
        self.controller.restore_original()
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if self.is_restored {
            return;
        }
        if let Err(error) = self.controller.restore_original() {
            tracing::warn!(
                message = "failed to restore terminal attributes on drop",
                error = %error
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ModeTransition, TerminalModeController, TerminalModeControllerExt};

    #[test]
    fn test_drop_restores() {
        let (controller, log) = TerminalModeController::new_mock();
        {
            let _raw_mode = controller.enter_raw().unwrap();
            assert!(log.is_raw());
        }
        assert!(!log.is_raw());
    }

    #[test]
    fn test_explicit_restore_does_not_restore_twice() {
        let (controller, log) = TerminalModeController::new_mock();
        controller.enter_raw().unwrap().restore().unwrap();
        pretty_assertions::assert_eq!(
            log.get_copy(),
            vec![ModeTransition::EnterRaw, ModeTransition::RestoreOriginal]
        );
    }

    #[test]
    fn test_panic_while_raw_restores() {
        let (controller, log) = TerminalModeController::new_mock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _raw_mode = controller.enter_raw().unwrap();
            panic!("read loop blew up");
        }));
        assert!(result.is_err());
        assert!(!log.is_raw());
    }
}
