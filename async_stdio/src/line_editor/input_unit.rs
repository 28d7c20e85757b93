// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BACKSPACE, LINE_TERMINATOR};

/// One key press, decoded from a single `read(2)` on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputUnit {
    Backspace,
    LineTerminator,
    Printable(char),
}

impl InputUnit {
    /// Returns `None` for noise, which the editor drops without echoing:
    /// - a read that did not produce exactly one byte (escape sequences for arrow keys,
    ///   multi-byte UTF-8, empty reads),
    /// - a single byte outside 7-bit ASCII.
    #[must_use]
    pub fn classify(chunk: &[u8]) -> Option<Self> {
        let [byte] = chunk else {
            return None;
        };
        match *byte {
            BACKSPACE => Some(Self::Backspace),
            LINE_TERMINATOR => Some(Self::LineTerminator),
            it if it.is_ascii() => Some(Self::Printable(char::from(it))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"\x7f", Some(InputUnit::Backspace) ; "backspace")]
    #[test_case(b"\n", Some(InputUnit::LineTerminator) ; "line terminator")]
    #[test_case(b"a", Some(InputUnit::Printable('a')) ; "letter")]
    #[test_case(b" ", Some(InputUnit::Printable(' ')) ; "space")]
    #[test_case(b"\x1b", Some(InputUnit::Printable('\x1b')) ; "lone escape is ascii")]
    #[test_case(b"", None ; "empty read")]
    #[test_case(b"\x1b[A", None ; "arrow key sequence")]
    #[test_case("é".as_bytes(), None ; "multi byte utf8")]
    #[test_case(b"\xe9", None ; "lone non ascii byte")]
    fn test_classify(chunk: &[u8], expected: Option<InputUnit>) {
        pretty_assertions::assert_eq!(InputUnit::classify(chunk), expected);
    }
}
