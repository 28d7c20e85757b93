// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          io::{Read, Result}};

/// Replays a fixed list of chunks, one chunk per [`Read::read()`] call, the way a raw
/// mode terminal delivers one key press per `read(2)`. Once the script runs out, every
/// read returns `Ok(0)`, like a terminal that hung up.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub chunks: VecDeque<Vec<u8>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into(),
        }
    }
}

impl Read for ScriptedInput {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chunk_larger_than_buffer_is_split() {
        let mut input = ScriptedInput::new(vec![b"abcde".to_vec()]);
        let mut buf = [0_u8; 3];
        assert_eq!(input.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"abc");
        assert_eq!(input.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"de");
        assert_eq!(input.read(&mut buf).unwrap(), 0);
    }
}
