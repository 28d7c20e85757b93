// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Result type used throughout this crate.
pub type CommonResult<T> = Result<T, AsyncStdioError>;

/// I/O faults that can surface from the terminal coordinator. Each one is returned to
/// the immediate caller of the operation that was in progress, after any scoped raw mode
/// has been unwound. None of them are retried internally.
///
/// Writing to the terminal without holding the [`crate::OutputGate`] is not listed here,
/// since the API makes it impossible: write methods only exist on
/// [`crate::OutputGuard`].
#[derive(Debug, Error, Diagnostic)]
pub enum AsyncStdioError {
    #[error("failed to get terminal attributes")]
    #[diagnostic(
        code(r3bl_async_stdio::get_attributes),
        help("Is stdin (or /dev/tty) connected to a terminal?")
    )]
    GetAttributes(#[source] io::Error),

    #[error("failed to set terminal attributes")]
    #[diagnostic(code(r3bl_async_stdio::set_attributes))]
    SetAttributes(#[source] io::Error),

    #[error("failed to read from the input device")]
    #[diagnostic(code(r3bl_async_stdio::read))]
    Read(#[source] io::Error),

    #[error("failed to write to the output device")]
    #[diagnostic(code(r3bl_async_stdio::write))]
    Write(#[source] io::Error),

    #[error("input device hung up ({empty_read_count} consecutive empty reads)")]
    #[diagnostic(
        code(r3bl_async_stdio::input_closed),
        help("The terminal was closed, or stdin reached EOF.")
    )]
    InputClosed { empty_read_count: usize },

    #[error("failed to register the interrupt signal handler")]
    #[diagnostic(code(r3bl_async_stdio::signal_registration))]
    SignalRegistration(#[source] io::Error),

    #[error("failed to spawn thread `{name}`")]
    #[diagnostic(code(r3bl_async_stdio::thread_spawn))]
    ThreadSpawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("the background task panicked")]
    #[diagnostic(code(r3bl_async_stdio::background_task_panicked))]
    BackgroundTaskPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_and_code() {
        let error = AsyncStdioError::InputClosed {
            empty_read_count: 64,
        };
        pretty_assertions::assert_eq!(
            error.to_string(),
            "input device hung up (64 consecutive empty reads)"
        );
        let code = error.code().map(|it| it.to_string());
        pretty_assertions::assert_eq!(
            code.as_deref(),
            Some("r3bl_async_stdio::input_closed")
        );
    }

    #[test]
    fn test_error_keeps_io_source() {
        let error = AsyncStdioError::Read(io::Error::other("boom"));
        let source = std::error::Error::source(&error).map(ToString::to_string);
        pretty_assertions::assert_eq!(source.as_deref(), Some("boom"));
    }
}
