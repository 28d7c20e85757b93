// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Two ways for a session to end:
//! 1. Cooperative: a line handler (or anything else holding a [`ShutdownBridge`]) calls
//!    [`ShutdownBridge::stop()`]. The [`RunningFlag`] is cleared, the foreground loop
//!    exits after the current line, and the background task returns on its own.
//! 2. Interrupt: <kbd>Ctrl+C</kbd> raises `SIGINT`, the [`InterruptWatcher`] thread
//!    wakes up, and runs [`ShutdownBridge::handle_interrupt()`]. Then it restores the
//!    terminal and terminates the process with [`crate::INTERRUPT_EXIT_CODE`].

// Private modules (hide internal structure).
mod default_interrupt;
mod interrupt_watcher;
mod running_flag;
mod shutdown_bridge;

// Re-exports for flat public API.
pub use default_interrupt::*;
pub use interrupt_watcher::*;
pub use running_flag::*;
pub use shutdown_bridge::*;
