// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InputDevice, ScriptedInput};

pub trait InputDeviceExt {
    /// Each element of `chunks` is returned by one read.
    fn new_mock(chunks: Vec<Vec<u8>>) -> InputDevice;

    /// Every byte of `keys` is returned by its own read, as if typed one key at a time.
    fn new_mock_from_keys(keys: &str) -> InputDevice;
}

impl InputDeviceExt for InputDevice {
    fn new_mock(chunks: Vec<Vec<u8>>) -> InputDevice {
        InputDevice {
            resource: Box::new(ScriptedInput::new(chunks)),
            is_mock: true,
        }
    }

    fn new_mock_from_keys(keys: &str) -> InputDevice {
        let chunks = keys.bytes().map(|byte| vec![byte]).collect();
        Self::new_mock(chunks)
    }
}
