// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod gate_writer;
mod input_buffer;
mod output_gate_impl;

// Re-exports for flat public API.
pub use gate_writer::*;
pub use input_buffer::*;
pub use output_gate_impl::*;
