// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mocks for every device a session touches, so the line editor, the gate, and the
//! orchestrator can be tested without a terminal.

// Attach sources.
pub mod input_device_fixtures;
pub mod output_device_fixtures;
pub mod terminal_mode_fixtures;

// Re-export.
pub use input_device_fixtures::*;
pub use output_device_fixtures::*;
pub use terminal_mode_fixtures::*;
