// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte codes and limits shared by the line editor, the output gate, and the shutdown
//! bridge.

/// The byte a terminal sends for the <kbd>Backspace</kbd> key when canonical mode is off
/// (`DEL`).
pub const BACKSPACE: u8 = 0x7F;

/// The byte that submits the in-progress line. `ICRNL` stays enabled in raw mode, so
/// <kbd>Enter</kbd> arrives as `\n`.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Move the cursor back one cell, overwrite that cell with a space, and move back again.
pub const ERASE_LAST_CELL: &[u8] = b"\x08 \x08";

/// Maximum number of bytes requested from the input device per `read(2)` call. A key
/// press that encodes to more than one byte arrives as a single multi-byte read, which
/// is discarded.
pub const READ_CHUNK_SIZE: usize = 7;

/// Number of consecutive zero-length reads after which the input device is considered
/// hung up.
pub const EMPTY_READ_LIMIT: usize = 64;

/// Process exit status used when an interrupt signal terminates the session.
pub const INTERRUPT_EXIT_CODE: i32 = 1;

/// Inline capacity (in bytes) of the [`crate::InputBuffer`] before it spills to the heap.
pub const INPUT_BUFFER_INLINE_SIZE: usize = 64;

/// Name of the thread that runs the caller supplied background task.
pub const BACKGROUND_THREAD_NAME: &str = "async-stdio-background";

/// Name of the thread that waits for `SIGINT`.
pub const INTERRUPT_WATCHER_THREAD_NAME: &str = "async-stdio-sigint";
