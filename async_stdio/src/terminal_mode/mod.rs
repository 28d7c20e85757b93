// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scoped raw mode for the line editor.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked Mode** (default):
//! - Input is line-buffered (waits for Enter key)
//! - Echoing is enabled (typed characters appear on screen)
//!
//! **Raw Mode** (as used here):
//! - No line buffering - each byte is available immediately (`VMIN=1`, `VTIME=0`)
//! - No echo - the line editor echoes by hand, while holding the
//!   [`crate::OutputGate`]
//!
//! Unlike `cfmakeraw()`, only `ECHO` and `ICANON` are cleared. `ISIG` stays on so that
//! <kbd>Ctrl+C</kbd> still raises `SIGINT` for the [`crate::ShutdownBridge`], and
//! `OPOST` stays on so that `\n` still moves to the start of the next line.
//!
//! Raw mode is only active while [`crate::LineEditor::read_line()`] is blocked in a
//! read. See [`RawModeGuard`].

// Private modules (hide internal structure).
mod raw_mode_guard;
mod terminal_mode_controller;

// Re-exports for flat public API.
pub use raw_mode_guard::*;
pub use terminal_mode_controller::*;
