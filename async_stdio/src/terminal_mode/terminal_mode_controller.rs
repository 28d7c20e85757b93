// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words tcgetattr tcsetattr TCSADRAIN

use crate::{AsyncStdioError, CommonResult, RawModeGuard, StdMutex, TerminalFd};
use rustix::{fd::AsFd,
             termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios}};
use std::sync::Arc;

/// Captures the terminal's original attributes once, derives the raw variant from them,
/// and switches between the two. Both attribute sets are applied with `TCSADRAIN`, so
/// they take effect after pending output has been written.
///
/// Use [`Self::enter_raw()`] to get a [`RawModeGuard`], which restores the original
/// attributes on every exit path.
#[derive(Debug)]
pub struct TerminalModeController {
    backend: ModeBackend,
}

#[derive(Debug)]
enum ModeBackend {
    Tty(TtyModes),
    Mock(ModeTransitionLog),
}

#[derive(Debug)]
struct TtyModes {
    fd: Arc<TerminalFd>,
    original: Termios,
    raw: Termios,
}

impl TerminalModeController {
    /// Same as [`Self::capture_original_from()`], with the terminal from
    /// [`TerminalFd::open()`].
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::GetAttributes`] if there is no terminal to talk to, or
    /// its attributes can't be read.
    pub fn capture_original() -> CommonResult<Self> {
        let fd = TerminalFd::open().map_err(AsyncStdioError::GetAttributes)?;
        Self::capture_original_from(Arc::new(fd))
    }

    /// Read the current attributes of `fd`. They are kept as the `original` set for the
    /// lifetime of this controller. Share `fd` with [`crate::InputDevice::new_terminal()`]
    /// so that key presses are read from the terminal that is in raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::GetAttributes`] if `fd` is not a terminal, or its
    /// attributes can't be read.
    pub fn capture_original_from(fd: Arc<TerminalFd>) -> CommonResult<Self> {
        let original = termios::tcgetattr(&*fd)
            .map_err(|errno| AsyncStdioError::GetAttributes(errno.into()))?;
        let raw = derive_raw_termios(&original);
        tracing::debug!(message = "captured original terminal attributes", fd = ?fd);
        Ok(Self {
            backend: ModeBackend::Tty(TtyModes { fd, original, raw }),
        })
    }

    /// Create a controller that does not touch any terminal. It appends every
    /// transition to `log` instead. See [`crate::TerminalModeControllerExt`].
    #[must_use]
    pub fn from_transition_log(log: ModeTransitionLog) -> Self {
        Self {
            backend: ModeBackend::Mock(log),
        }
    }

    #[must_use]
    pub fn is_mock(&self) -> bool { matches!(self.backend, ModeBackend::Mock(_)) }

    /// Apply the raw attributes and return a guard that restores the original ones when
    /// it goes out of scope.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::SetAttributes`] if the raw attributes can't be applied.
    /// The terminal is unchanged in this case, so there is nothing to restore.
    pub fn enter_raw(&self) -> CommonResult<RawModeGuard<'_>> {
        match &self.backend {
            ModeBackend::Tty(tty_modes) => set_attributes(&*tty_modes.fd, &tty_modes.raw)?,
            ModeBackend::Mock(log) => log.record(ModeTransition::EnterRaw),
        }
        Ok(RawModeGuard::new(self))
    }

    /// Reapply the attributes captured by [`Self::capture_original_from()`].
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::SetAttributes`] if the attributes can't be applied.
    pub fn restore_original(&self) -> CommonResult<()> {
        match &self.backend {
            ModeBackend::Tty(tty_modes) => {
                set_attributes(&*tty_modes.fd, &tty_modes.original)
            }
            ModeBackend::Mock(log) => {
                log.record(ModeTransition::RestoreOriginal);
                Ok(())
            }
        }
    }

    /// A detached handle that can put the original attributes back from another thread.
    /// The interrupt watcher uses this right before the process exits, since the
    /// foreground thread never gets to drop its [`RawModeGuard`] in that case.
    #[must_use]
    pub fn restorer(&self) -> TerminalRestorer {
        match &self.backend {
            ModeBackend::Tty(tty_modes) => TerminalRestorer {
                backend: RestorerBackend::Tty(
                    tty_modes.fd.clone(),
                    tty_modes.original.clone(),
                ),
            },
            ModeBackend::Mock(log) => TerminalRestorer {
                backend: RestorerBackend::Mock(log.clone()),
            },
        }
    }
}

/// Clone of the original attributes, and a handle to the same terminal, that can be
/// sent to another thread. See
/// [`TerminalModeController::restorer()`].
#[derive(Debug, Clone)]
pub struct TerminalRestorer {
    backend: RestorerBackend,
}

#[derive(Debug, Clone)]
enum RestorerBackend {
    Tty(Arc<TerminalFd>, Termios),
    Mock(ModeTransitionLog),
}

impl TerminalRestorer {
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::SetAttributes`] if the attributes can't be applied.
    pub fn restore(&self) -> CommonResult<()> {
        match &self.backend {
            RestorerBackend::Tty(fd, original) => set_attributes(&**fd, original),
            RestorerBackend::Mock(log) => {
                log.record(ModeTransition::RestoreOriginal);
                Ok(())
            }
        }
    }
}

/// Only echo and canonical mode are turned off. Reads block until at least one byte is
/// available, with no inter-byte timeout.
#[must_use]
pub fn derive_raw_termios(original: &Termios) -> Termios {
    let mut raw = original.clone();
    raw.local_modes.remove(LocalModes::ECHO | LocalModes::ICANON);
    raw.special_codes[SpecialCodeIndex::VMIN] = 1;
    raw.special_codes[SpecialCodeIndex::VTIME] = 0;
    raw
}

fn set_attributes(fd: impl AsFd, attributes: &Termios) -> CommonResult<()> {
    termios::tcsetattr(fd, OptionalActions::Drain, attributes)
        .map_err(|errno| AsyncStdioError::SetAttributes(errno.into()))
}

/// A terminal attribute change made by a mock [`TerminalModeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ModeTransition {
    EnterRaw,
    RestoreOriginal,
}

/// You can safely clone this struct, since it only contains an `Arc`. All clones append
/// to the same list.
#[derive(Debug, Clone, Default)]
pub struct ModeTransitionLog {
    pub transitions: Arc<StdMutex<Vec<ModeTransition>>>,
}

impl ModeTransitionLog {
    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    pub fn record(&self, transition: ModeTransition) {
        self.transitions.lock().unwrap().push(transition);
    }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    #[must_use]
    pub fn get_copy(&self) -> Vec<ModeTransition> { self.transitions.lock().unwrap().clone() }

    /// Whether the most recent transition left the (mock) terminal in raw mode.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.get_copy().last() == Some(&ModeTransition::EnterRaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerminalModeControllerExt;

    #[test]
    fn test_mock_enter_and_restore() {
        let (controller, log) = TerminalModeController::new_mock();
        assert!(controller.is_mock());

        let guard = controller.enter_raw().unwrap();
        assert!(log.is_raw());
        guard.restore().unwrap();
        assert!(!log.is_raw());

        pretty_assertions::assert_eq!(
            log.get_copy(),
            vec![ModeTransition::EnterRaw, ModeTransition::RestoreOriginal]
        );
    }

    #[test]
    fn test_mock_restorer_shares_log() {
        let (controller, log) = TerminalModeController::new_mock();
        let restorer = controller.restorer();
        std::thread::spawn(move || restorer.restore().unwrap())
            .join()
            .unwrap();
        pretty_assertions::assert_eq!(log.get_copy(), vec![ModeTransition::RestoreOriginal]);
    }

    #[test]
    fn test_derive_raw_termios_clears_echo_and_icanon_only() {
        let (_leader, follower) = crate::open_pty_pair().unwrap();
        let original = termios::tcgetattr(&follower).unwrap();
        let raw = derive_raw_termios(&original);

        assert!(!raw.local_modes.contains(LocalModes::ECHO));
        assert!(!raw.local_modes.contains(LocalModes::ICANON));
        pretty_assertions::assert_eq!(
            raw.local_modes.contains(LocalModes::ISIG),
            original.local_modes.contains(LocalModes::ISIG)
        );
        pretty_assertions::assert_eq!(raw.input_modes, original.input_modes);
        pretty_assertions::assert_eq!(raw.output_modes, original.output_modes);
        pretty_assertions::assert_eq!(raw.special_codes[SpecialCodeIndex::VMIN], 1);
        pretty_assertions::assert_eq!(raw.special_codes[SpecialCodeIndex::VTIME], 0);
    }
}
