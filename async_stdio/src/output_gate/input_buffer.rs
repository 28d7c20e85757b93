// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::INPUT_BUFFER_INLINE_SIZE;
use smallstr::SmallString;

pub type InlineInputString = SmallString<[u8; INPUT_BUFFER_INLINE_SIZE]>;

/// Characters that have been typed and echoed, but not yet submitted with
/// <kbd>Enter</kbd>.
///
/// Only 7-bit ASCII is ever pushed, so [`Self::len()`] is both the number of bytes and
/// the number of terminal cells the pending input occupies. That's the number of erase
/// sequences needed to wipe it off the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    inner: InlineInputString,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self {
            inner: InlineInputString::new(),
        }
    }
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, ch: char) {
        debug_assert!(ch.is_ascii());
        self.inner.push(ch);
    }

    /// Remove the last character. Returns `None` if the buffer is already empty.
    pub fn pop(&mut self) -> Option<char> { self.inner.pop() }

    #[must_use]
    pub fn len(&self) -> usize { self.inner.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    #[must_use]
    pub fn as_str(&self) -> &str { self.inner.as_str() }

    /// Move the contents out as the completed line, leaving this buffer empty.
    pub fn take(&mut self) -> String {
        let line = self.inner.to_string();
        self.inner.clear();
        line
    }
}
