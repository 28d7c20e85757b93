// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Disambiguate the type of `StdMutex` from other mutex implementations.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output device (raw terminal, mock, etc).
pub type SendRawTerminal = dyn std::io::Write + Send;

/// Type alias for a `Send`-able input device (raw terminal, mock, etc).
pub type SendRawInput = dyn std::io::Read + Send;
