// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use rustix::{fd::{AsFd, BorrowedFd, OwnedFd},
             termios};
use std::{fs::File, io};

/// The terminal a session reads key presses from and switches into raw mode. Both
/// happen on this one file descriptor, so when stdin is redirected the session still
/// reads from the same device whose attributes it changed.
#[derive(Debug)]
pub enum TerminalFd {
    Stdin(io::Stdin),
    /// The controlling terminal, opened because stdin is not a TTY.
    DevTty(File),
    /// Any other terminal device, such as the follower side of a pseudo terminal.
    Device(OwnedFd),
}

impl TerminalFd {
    /// Use stdin if it is a TTY, and fall back to `/dev/tty` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is not a TTY and `/dev/tty` can't be opened (for
    /// example, when there is no controlling terminal).
    pub fn open() -> io::Result<Self> {
        let stdin = io::stdin();
        if termios::isatty(&stdin) {
            Ok(TerminalFd::Stdin(stdin))
        } else {
            let file = File::options().read(true).write(true).open("/dev/tty")?;
            Ok(TerminalFd::DevTty(file))
        }
    }
}

impl From<OwnedFd> for TerminalFd {
    fn from(fd: OwnedFd) -> Self { TerminalFd::Device(fd) }
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
            TerminalFd::Device(fd) => fd.as_fd(),
        }
    }
}
