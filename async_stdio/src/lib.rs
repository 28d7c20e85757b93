// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios rustix SIGINT

//! # r3bl_async_stdio
//!
//! Share one terminal between a line prompt on the foreground thread and a background
//! thread that can print at any time, without either one corrupting the other's output.
//!
//! ```text
//! ┌───────────────────────┐        ┌───────────────────────┐
//! │ foreground thread     │        │ background thread     │
//! │ LineEditor::read_line │        │ background_task(..)   │
//! └──────────┬────────────┘        └──────────┬────────────┘
//!            │ echo (lock, no erase)          │ acquire (lock + erase)
//!            ▼                                ▼
//!        ┌────────────────────────────────────────┐
//!        │ OutputGate: InputBuffer + OutputDevice │
//!        └────────────────────────────────────────┘
//! ```
//!
//! - The [`LineEditor`] reads the terminal in raw mode one key press at a time, echoes
//!   it by hand, and handles <kbd>Backspace</kbd> itself. The characters typed so far
//!   live in the [`OutputGate`].
//! - Background output goes through [`OutputGate::acquire()`]. This erases the
//!   unsubmitted input. [`OutputGuard::println()`] then writes the message and redraws
//!   the input, so the user can keep typing where they left off.
//! - A [`ShutdownBridge`] connects <kbd>Ctrl+C</kbd> and [`ShutdownBridge::stop()`] to
//!   the [`RunningFlag`] and an optional exit callback.
//!
//! # Usage
//!
//! ```no_run
//! use r3bl_async_stdio::{Liveness, OutputGate, ShutdownBridge, run};
//! use std::time::Duration;
//!
//! fn main() -> miette::Result<()> {
//!     run(
//!         |gate: OutputGate, bridge: ShutdownBridge| {
//!             let one_second = Duration::from_secs(1);
//!             while bridge.running().sleep_while_running(one_second) == Liveness::Running {
//!                 if let Ok(mut guard) = gate.acquire() {
//!                     let _unused = guard.println("tick");
//!                 }
//!             }
//!         },
//!         |line, gate, bridge| {
//!             if line == "quit" {
//!                 bridge.stop();
//!             } else if let Ok(mut guard) = gate.acquire() {
//!                 let _unused = guard.println(&format!("you typed {line}"));
//!             }
//!         },
//!         None,
//!     )
//! }
//! ```
//!
//! Only 7-bit ASCII input is supported. A key press that encodes to more than one byte
//! (arrow keys, non-ASCII characters) is dropped.
//!
//! # Testing
//!
//! Every device a session touches has a mock in [`mod@test_fixtures`]:
//! [`OutputDeviceExt::new_mock()`], [`InputDeviceExt::new_mock()`], and
//! [`TerminalModeControllerExt::new_mock()`]. Pass them to [`AsyncStdio::new()`] and
//! drive the session with [`run_with()`].

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod common;
pub mod line_editor;
pub mod log;
pub mod orchestrator;
pub mod output_gate;
pub mod shutdown;
pub mod terminal_io;
pub mod terminal_mode;
pub mod test_fixtures;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use common::*;
pub use line_editor::*;
pub use log::*;
pub use orchestrator::*;
pub use output_gate::*;
pub use shutdown::*;
pub use terminal_io::*;
pub use terminal_mode::*;
pub use test_fixtures::*;
