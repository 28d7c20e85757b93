// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AsyncStdioError, CommonResult, InputDevice, LineEditor, OutputDevice,
            OutputGate, TerminalFd, TerminalModeController};
use std::sync::Arc;

/// The terminal side of a session: one [`OutputGate`] shared by every writer, and the
/// [`LineEditor`] that runs on the foreground thread and echoes through that same gate.
#[allow(missing_debug_implementations)]
pub struct AsyncStdio {
    pub gate: OutputGate,
    pub line_editor: LineEditor,
}

impl AsyncStdio {
    /// Wire up stdout and the terminal from [`TerminalFd::open()`]. Key presses are read
    /// from the same file descriptor that is switched into raw mode, which is
    /// `/dev/tty` when stdin is redirected.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::GetAttributes`] if there is no terminal.
    pub fn try_new_stdio() -> CommonResult<Self> {
        let terminal_fd =
            Arc::new(TerminalFd::open().map_err(AsyncStdioError::GetAttributes)?);
        Self::new_on_terminal(terminal_fd, OutputDevice::new_stdout())
    }

    /// Read key presses from `terminal_fd` and switch it into raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::GetAttributes`] if `terminal_fd` is not a terminal.
    pub fn new_on_terminal(
        terminal_fd: Arc<TerminalFd>,
        output_device: OutputDevice,
    ) -> CommonResult<Self> {
        let terminal_mode = TerminalModeController::capture_original_from(terminal_fd.clone())?;
        Ok(Self::new(
            InputDevice::new_terminal(terminal_fd),
            output_device,
            terminal_mode,
        ))
    }

    #[must_use]
    pub fn new(
        input_device: InputDevice,
        output_device: OutputDevice,
        terminal_mode: TerminalModeController,
    ) -> Self {
        let gate = OutputGate::new(output_device);
        let line_editor = LineEditor::new(input_device, terminal_mode, gate.clone());
        Self { gate, line_editor }
    }
}
