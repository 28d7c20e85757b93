// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AsyncStdioError, CommonResult, SendRawTerminal};
use std::io::Write;

/// This struct represents an output device that can be used to write to the terminal.
/// - It is owned by the [`crate::OutputGate`], which is the only way to write to it. So
///   unlike a plain `stdout` handle it does not carry its own lock.
/// - For testing, see [`crate::OutputDeviceExt::new_mock()`].
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: Box<SendRawTerminal>,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Box::new(std::io::stdout()),
            is_mock: false,
        }
    }

    /// Write all the `bytes` and flush, so they are visible on the terminal right away.
    /// The line editor echoes one byte at a time, so nothing may sit in a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`AsyncStdioError::Write`] if writing or flushing fails.
    pub fn write_and_flush(&mut self, bytes: &[u8]) -> CommonResult<()> {
        self.resource
            .write_all(bytes)
            .and_then(|()| self.resource.flush())
            .map_err(AsyncStdioError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputDeviceExt;

    #[test]
    fn test_stdout_output_device_is_not_mock() {
        let device = OutputDevice::new_stdout();
        assert!(!device.is_mock);
    }

    #[test]
    fn test_write_and_flush_to_mock() {
        let (mut device, stdout_mock) = OutputDevice::new_mock();
        device.write_and_flush(b"abc").unwrap();
        device.write_and_flush(b"\n").unwrap();
        pretty_assertions::assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "abc\n");
    }
}
