// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CommonResult, ERASE_LAST_CELL, GateWriter, InputBuffer, OutputDevice,
            StdMutex};
use std::sync::{Arc, MutexGuard, PoisonError};

/// Everything that lives behind the gate's lock. The [`InputBuffer`] is stored next to
/// the [`OutputDevice`] so that whoever can write to the terminal can also see what the
/// user has typed so far, and nobody else can.
#[allow(missing_debug_implementations)]
pub struct GateState {
    pub input_buffer: InputBuffer,
    pub output_device: OutputDevice,
}

/// The only way to write to the terminal. You can safely clone this struct, since it only
/// contains an `Arc`. All clones guard the same [`OutputDevice`].
///
/// The line editor on the foreground thread and any number of background threads share
/// one gate. A background thread calls [`Self::acquire()`], which blocks until nobody else
/// is writing, then erases the line the user is in the middle of typing. The returned
/// [`OutputGuard`] writes the message, and [`OutputGuard::println()`] puts the pending
/// input back, so the user can keep typing where they left off.
///
/// ```
/// use r3bl_async_stdio::{OutputDevice, OutputDeviceExt, OutputGate};
///
/// let (output_device, stdout_mock) = OutputDevice::new_mock();
/// let gate = OutputGate::new(output_device);
/// gate.acquire().unwrap().println("hello").unwrap();
/// assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "hello\n");
/// ```
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputGate {
    state: Arc<StdMutex<GateState>>,
}

impl OutputGate {
    #[must_use]
    pub fn new(output_device: OutputDevice) -> Self {
        Self {
            state: Arc::new(StdMutex::new(GateState {
                input_buffer: InputBuffer::new(),
                output_device,
            })),
        }
    }

    /// Block until this thread has exclusive access to the terminal. Acquisition is
    /// unordered: there is no FIFO guarantee between waiting threads.
    ///
    /// Side effect: if the user has typed anything that hasn't been submitted yet, one
    /// erase sequence per pending character is written before this returns, so the
    /// caller's output starts at the beginning of an empty line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AsyncStdioError::Write`] if the erase sequences can't be written.
    pub fn acquire(&self) -> CommonResult<OutputGuard<'_>> {
        let mut state = self.lock_state();
        erase_pending_input(&mut state)?;
        Ok(OutputGuard {
            state,
            is_input_redrawn: false,
        })
    }

    /// Used by the line editor, which has to hold the lock while it echoes a key press,
    /// but must not erase the input it is in the middle of echoing.
    pub(crate) fn lock_without_erase(&self) -> MutexGuard<'_, GateState> {
        self.lock_state()
    }

    /// Copy of the pending (unsubmitted) input.
    #[must_use]
    pub fn get_copy_of_input_buffer(&self) -> String {
        self.lock_state().input_buffer.as_str().to_string()
    }

    /// A writer that panics mid-message poisons the lock, but leaves the state
    /// consistent. At worst a partial line is on screen.
    fn lock_state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether `self` and `other` are clones of the same gate.
    #[must_use]
    pub fn is_same_gate(&self, other: &OutputGate) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// An [`std::io::Write`] implementation that prints each complete line through this
    /// gate. See [`GateWriter`].
    #[must_use]
    pub fn writer(&self) -> GateWriter { GateWriter::new(self.clone()) }
}

fn erase_pending_input(state: &mut GateState) -> CommonResult<()> {
    let pending_len = state.input_buffer.len();
    if pending_len == 0 {
        return Ok(());
    }
    let erase_sequence = ERASE_LAST_CELL.repeat(pending_len);
    state.output_device.write_and_flush(&erase_sequence)
}

/// Exclusive access to the terminal, returned by [`OutputGate::acquire()`]. Drop it (or
/// call [`Self::release()`]) to let other threads write. Releasing does not redraw the
/// pending input; only [`Self::println()`] does.
#[must_use = "the gate is released as soon as this guard is dropped"]
#[allow(missing_debug_implementations)]
pub struct OutputGuard<'a> {
    state: MutexGuard<'a, GateState>,
    /// Set once [`Self::println()`] has put the pending input back on screen. The next
    /// write has to wipe it again first.
    is_input_redrawn: bool,
}

impl OutputGuard<'_> {
    /// Write `text` as is, and flush. The pending input is not redrawn, so a `puts()`
    /// that doesn't end with a `println()` leaves the prompt blank until the user types
    /// the next character.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AsyncStdioError::Write`] if writing fails.
    pub fn puts(&mut self, text: &str) -> CommonResult<()> {
        self.erase_redraw_if_needed()?;
        self.state.output_device.write_and_flush(text.as_bytes())
    }

    /// Write `message` followed by a newline, then redraw the pending input verbatim, in
    /// a single write.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AsyncStdioError::Write`] if writing fails.
    pub fn println(&mut self, message: &str) -> CommonResult<()> {
        self.erase_redraw_if_needed()?;

        let pending_input = self.state.input_buffer.as_str();
        let mut output =
            String::with_capacity(message.len() + 1 + pending_input.len());
        output.push_str(message);
        output.push('\n');
        output.push_str(pending_input);

        self.state.output_device.write_and_flush(output.as_bytes())?;
        self.is_input_redrawn = !self.state.input_buffer.is_empty();
        Ok(())
    }

    /// Same as dropping the guard.
    pub fn release(self) {}

    #[must_use]
    pub fn pending_input(&self) -> &str { self.state.input_buffer.as_str() }

    fn erase_redraw_if_needed(&mut self) -> CommonResult<()> {
        if self.is_input_redrawn {
            erase_pending_input(&mut self.state)?;
            self.is_input_redrawn = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputDeviceExt;
    use pretty_assertions::assert_eq;
    use std::thread;

    fn gate_with_pending_input(pending: &str) -> (OutputGate, crate::StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let gate = OutputGate::new(output_device);
        {
            let mut state = gate.lock_without_erase();
            for ch in pending.chars() {
                state.input_buffer.push(ch);
            }
        }
        (gate, stdout_mock)
    }

    #[test]
    fn test_acquire_with_empty_buffer_writes_nothing() {
        let (gate, stdout_mock) = gate_with_pending_input("");
        let guard = gate.acquire().unwrap();
        guard.release();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
    }

    #[test]
    fn test_println_erases_then_redraws() {
        let (gate, stdout_mock) = gate_with_pending_input("abc");
        let mut guard = gate.acquire().unwrap();
        assert_eq!(guard.pending_input(), "abc");
        guard.println("msg").unwrap();
        drop(guard);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\x08 \x08\x08 \x08\x08 \x08msg\nabc"
        );
        assert_eq!(gate.get_copy_of_input_buffer(), "abc");
    }

    #[test]
    fn test_puts_does_not_redraw() {
        let (gate, stdout_mock) = gate_with_pending_input("ab");
        let mut guard = gate.acquire().unwrap();
        guard.puts("[0001]").unwrap();
        drop(guard);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\x08 \x08\x08 \x08[0001]"
        );
    }

    #[test]
    fn test_second_println_on_same_guard_erases_the_redraw() {
        let (gate, stdout_mock) = gate_with_pending_input("ab");
        let mut guard = gate.acquire().unwrap();
        guard.println("one").unwrap();
        guard.println("two").unwrap();
        guard.release();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\x08 \x08\x08 \x08one\nab\x08 \x08\x08 \x08two\nab"
        );
    }

    #[test]
    fn test_gate_still_works_after_a_writer_panics() {
        let (gate, stdout_mock) = gate_with_pending_input("ab");
        let panicking_writer = {
            let gate = gate.clone();
            thread::spawn(move || {
                let mut guard = gate.acquire().unwrap();
                guard.puts("partial").unwrap();
                panic!("writer panicked while holding the gate");
            })
        };
        assert!(panicking_writer.join().is_err());

        assert_eq!(gate.get_copy_of_input_buffer(), "ab");
        gate.lock_without_erase().input_buffer.push('c');
        let mut guard = gate.acquire().unwrap();
        assert_eq!(guard.pending_input(), "abc");
        guard.println("after").unwrap();
        drop(guard);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\x08 \x08\x08 \x08partial\x08 \x08\x08 \x08\x08 \x08after\nabc"
        );
    }

    #[test]
    fn test_concurrent_writes_are_contiguous() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let gate = OutputGate::new(output_device);
        let messages_per_thread = 50;

        let handles = (0..4)
            .map(|thread_index| {
                let gate = gate.clone();
                thread::spawn(move || {
                    for message_index in 0..messages_per_thread {
                        let mut guard = gate.acquire().unwrap();
                        guard.puts(&format!("<{thread_index}:")).unwrap();
                        guard.puts(&format!("{message_index:03}>")).unwrap();
                        guard.println("").unwrap();
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }

        let output = stdout_mock.get_copy_of_buffer_as_string();
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4 * messages_per_thread);
        for line in lines {
            assert!(line.starts_with('<') && line.ends_with('>'), "{line:?}");
            assert_eq!(line.matches('<').count(), 1, "{line:?}");
        }
    }
}
