// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_device_ext;
pub mod scripted_input;

// Re-export.
pub use input_device_ext::*;
pub use scripted_input::*;
