// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod input_unit;
mod line_editor_impl;

// Re-exports for flat public API.
pub use input_unit::*;
pub use line_editor_impl::*;
