// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod async_stdio_error;
mod constants;
mod type_aliases;

// Re-exports for flat public API.
pub use async_stdio_error::*;
pub use constants::*;
pub use type_aliases::*;
