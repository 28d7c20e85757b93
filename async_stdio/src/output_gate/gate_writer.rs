// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::OutputGate;
use std::io::{self, Write};

/// Adapter that lets anything expecting an [`std::io::Write`] (such as a
/// `tracing_subscriber` fmt layer) print through an [`OutputGate`]. Bytes are buffered
/// until a newline is seen, then each complete line is printed with
/// [`crate::OutputGuard::println()`], so the pending input is erased and redrawn around
/// it. A partial line is printed on [`Write::flush()`] and on drop.
#[allow(missing_debug_implementations)]
pub struct GateWriter {
    gate: OutputGate,
    line_buffer: Vec<u8>,
}

impl GateWriter {
    #[must_use]
    pub fn new(gate: OutputGate) -> Self {
        Self {
            gate,
            line_buffer: Vec::new(),
        }
    }

    fn print_lines(&mut self, lines: &[u8]) -> io::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(lines);
        let mut guard = self.gate.acquire().map_err(io::Error::other)?;
        for line in text.lines() {
            guard.println(line).map_err(io::Error::other)?;
        }
        Ok(())
    }
}

impl Write for GateWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line_buffer.extend_from_slice(buf);
        if let Some(last_newline) = self.line_buffer.iter().rposition(|&b| b == b'\n') {
            let rest = self.line_buffer.split_off(last_newline + 1);
            let complete_lines = std::mem::replace(&mut self.line_buffer, rest);
            self.print_lines(&complete_lines)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let partial_line = std::mem::take(&mut self.line_buffer);
        self.print_lines(&partial_line)
    }
}

impl Drop for GateWriter {
    fn drop(&mut self) { let _unused = self.flush(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDevice, OutputDeviceExt};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prints_only_complete_lines_until_flush() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let gate = OutputGate::new(output_device);
        let mut writer = gate.writer();

        writer.write_all(b"first li").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");

        writer.write_all(b"ne\nsecond").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "first line\n");

        writer.flush().unwrap();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "first line\nsecond\n"
        );
    }

    #[test]
    fn test_redraws_pending_input_after_each_line() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let gate = OutputGate::new(output_device);
        gate.lock_without_erase().input_buffer.push('x');

        let mut writer = gate.writer();
        writer.write_all(b"a\nb\n").unwrap();
        drop(writer);

        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\x08 \x08a\nx\x08 \x08b\nx"
        );
    }
}
