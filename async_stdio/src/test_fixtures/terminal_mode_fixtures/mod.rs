// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod pty_pair;
pub mod terminal_mode_ext;

// Re-export.
pub use pty_pair::*;
pub use terminal_mode_ext::*;
