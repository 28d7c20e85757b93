// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OutputDevice, StdoutMock};

pub trait OutputDeviceExt {
    fn new_mock() -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Box::new(stdout_mock.clone()),
            is_mock: true,
        };
        (this, stdout_mock)
    }
}

#[cfg(test)]
mod tests {
    use super::OutputDeviceExt;
    use crate::OutputDevice;

    #[test]
    fn test_mock_output_device_is_mock() {
        let (device, _) = OutputDevice::new_mock();
        assert!(device.is_mock);
    }
}
