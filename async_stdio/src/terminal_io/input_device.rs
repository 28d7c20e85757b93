// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SendRawInput, TerminalFd};
use std::{io::{self, Read},
          sync::Arc};

/// This struct represents an input device that raw bytes are read from. See
/// [`crate::InputDeviceExt`] for testing features.
///
/// Reads are unbuffered: each call to [`Self::read_chunk()`] is exactly one `read(2)` on
/// the terminal, so the number of bytes returned tells whether a single key press
/// encoded to a single byte.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: Box<SendRawInput>,
    pub is_mock: bool,
}

impl InputDevice {
    /// Read from `terminal_fd`, which should be the same [`TerminalFd`] that the
    /// [`crate::TerminalModeController`] switches into raw mode.
    #[must_use]
    pub fn new_terminal(terminal_fd: Arc<TerminalFd>) -> Self {
        Self {
            resource: Box::new(UnbufferedTerminal { terminal_fd }),
            is_mock: false,
        }
    }

    /// Read at most `buffer.len()` bytes. `EINTR` is retried; every other error is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    pub fn read_chunk(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.resource.read(buffer) {
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                result => return result,
            }
        }
    }
}

/// [`std::io::Stdin`] wraps fd 0 in a [`std::io::BufReader`]. That would hide how many
/// bytes a single key press produced, so read the fd directly instead.
struct UnbufferedTerminal {
    terminal_fd: Arc<TerminalFd>,
}

impl Read for UnbufferedTerminal {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        rustix::io::read(&*self.terminal_fd, buffer).map_err(io::Error::from)
    }
}
