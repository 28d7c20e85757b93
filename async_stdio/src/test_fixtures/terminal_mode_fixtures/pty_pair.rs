// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words openpt grantpt unlockpt ptsname NOCTTY CLOEXEC

use rustix::{fd::OwnedFd,
             fs::{Mode, OFlags},
             pty::{self, OpenptFlags}};
use std::io;

/// Open a new pseudo terminal and return `(leader, follower)`. The follower behaves like
/// a real terminal: its attributes can be read and changed, and bytes written to the
/// leader can be read from it. Neither side becomes the controlling terminal.
///
/// # Errors
///
/// Returns an error if the system has no pseudo terminals available.
pub fn open_pty_pair() -> io::Result<(OwnedFd, OwnedFd)> {
    let leader = pty::openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY)?;
    pty::grantpt(&leader)?;
    pty::unlockpt(&leader)?;
    let follower_path = pty::ptsname(&leader, Vec::new())?;
    let follower = rustix::fs::open(
        &follower_path,
        OFlags::RDWR | OFlags::NOCTTY | OFlags::CLOEXEC,
        Mode::empty(),
    )?;
    Ok((leader, follower))
}
