// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod session;
mod session_loop;

// Re-exports for flat public API.
pub use session::*;
pub use session_loop::*;
