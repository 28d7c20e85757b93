// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AsyncStdioError, CommonResult, EMPTY_READ_LIMIT, ERASE_LAST_CELL, GateState,
            InputDevice, InputUnit, LINE_TERMINATOR, OutputGate, READ_CHUNK_SIZE,
            TerminalModeController};

/// Reads one line at a time from the terminal in raw mode, echoing and handling
/// <kbd>Backspace</kbd> by hand. The characters typed so far are kept in the
/// [`OutputGate`]'s [`crate::InputBuffer`], so that background output can erase and
/// redraw them.
///
/// Every echo is written while holding the gate's lock, so it never lands in the middle
/// of some other thread's message.
#[allow(missing_debug_implementations)]
pub struct LineEditor {
    pub input_device: InputDevice,
    pub terminal_mode: TerminalModeController,
    pub gate: OutputGate,
}

/// What to do after one [`InputUnit`] has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    ReadNextUnit,
    LineCompleted(String),
}

impl LineEditor {
    #[must_use]
    pub fn new(
        input_device: InputDevice,
        terminal_mode: TerminalModeController,
        gate: OutputGate,
    ) -> Self {
        Self {
            input_device,
            terminal_mode,
            gate,
        }
    }

    /// Block until the user presses <kbd>Enter</kbd>, and return what they typed (without
    /// the line terminator). The terminal is in raw mode only while this function runs.
    ///
    /// # Errors
    ///
    /// - [`AsyncStdioError::SetAttributes`] if raw mode can't be entered or left.
    /// - [`AsyncStdioError::Read`] or [`AsyncStdioError::Write`] on an I/O failure.
    /// - [`AsyncStdioError::InputClosed`] if the input device keeps returning no data.
    ///
    /// In every error case the original terminal attributes have been put back (on a
    /// best effort basis) before this returns.
    pub fn read_line(&mut self) -> CommonResult<String> {
        let raw_mode = self.terminal_mode.enter_raw()?;

        match read_units_until_line_completed(&mut self.input_device, &self.gate) {
            Ok(line) => {
                raw_mode.restore()?;
                tracing::debug!(message = "line completed", line_len = line.len());
                Ok(line)
            }
            Err(error) => {
                drop(raw_mode);
                Err(error)
            }
        }
    }
}

fn read_units_until_line_completed(
    input_device: &mut InputDevice,
    gate: &OutputGate,
) -> CommonResult<String> {
    let mut chunk = [0_u8; READ_CHUNK_SIZE];
    let mut empty_read_count = 0;

    loop {
        let bytes_read = input_device
            .read_chunk(&mut chunk)
            .map_err(AsyncStdioError::Read)?;

        if bytes_read == 0 {
            empty_read_count += 1;
            if empty_read_count >= EMPTY_READ_LIMIT {
                return Err(AsyncStdioError::InputClosed { empty_read_count });
            }
            continue;
        }
        empty_read_count = 0;

        let Some(unit) = InputUnit::classify(&chunk[..bytes_read]) else {
            continue;
        };

        let mut state = gate.lock_without_erase();
        if let EditOutcome::LineCompleted(line) = apply_input_unit(&mut state, unit)? {
            return Ok(line);
        }
    }
}

/// Update the pending input and echo to the terminal for one key press. The caller must
/// hold the gate's lock for the whole call.
///
/// # Errors
///
/// Returns [`AsyncStdioError::Write`] if the echo can't be written.
pub fn apply_input_unit(
    state: &mut GateState,
    unit: InputUnit,
) -> CommonResult<EditOutcome> {
    match unit {
        InputUnit::Backspace => {
            state.input_buffer.pop();
            // The erase is written even when there was nothing to pop.
            state.output_device.write_and_flush(ERASE_LAST_CELL)?;
            Ok(EditOutcome::ReadNextUnit)
        }
        InputUnit::LineTerminator => {
            state.output_device.write_and_flush(&[LINE_TERMINATOR])?;
            Ok(EditOutcome::LineCompleted(state.input_buffer.take()))
        }
        InputUnit::Printable(ch) => {
            let mut encoded = [0_u8; 4];
            state
                .output_device
                .write_and_flush(ch.encode_utf8(&mut encoded).as_bytes())?;
            state.input_buffer.push(ch);
            Ok(EditOutcome::ReadNextUnit)
        }
    }
}
