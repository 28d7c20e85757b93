// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::StdMutex;
use smallvec::SmallVec;
use std::{io::{Result, Write},
          sync::Arc};

pub type StdoutMockBuffer = SmallVec<[u8; 256]>;

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<..>>`.
/// The inner `buffer` will not be cloned, just the [`Arc`] will be cloned.
///
/// The main constructors are:
/// - [`StdoutMock::default`]
/// - [`StdoutMock::new`]
/// - [`super::OutputDeviceExt::new_mock()`]
#[derive(Clone, Default)]
#[allow(missing_debug_implementations)]
pub struct StdoutMock {
    pub buffer: Arc<StdMutex<StdoutMockBuffer>>,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    #[must_use]
    pub fn get_copy_of_buffer(&self) -> StdoutMockBuffer {
        self.buffer.lock().unwrap().clone()
    }

    /// Invalid UTF-8 is replaced with `U+FFFD`.
    ///
    /// # Panics
    ///
    /// This will panic if the lock is poisoned.
    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer_data).into_owned()
    }
}

impl Write for StdoutMock {
    #[allow(clippy::unwrap_in_result)] /* This is for lock.unwrap() */
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}
