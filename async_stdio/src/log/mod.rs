// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging is **DISABLED** by **default**. Call [`try_initialize_logging_global()`] (in
//! an app) or [`try_initialize_logging_thread_local()`] (in a test) to turn it on.
//!
//! While a session is running, don't log to stdout directly, since that corrupts the
//! line the user is typing. Use [`DisplayPreference::Gate`] to route log lines through
//! the [`crate::OutputGate`], or log to a file.

// Private modules (hide internal structure).
mod public_api;
mod rolling_file_appender_impl;
mod tracing_config;
mod tracing_init;

// Re-exports for flat public API.
pub use public_api::*;
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
