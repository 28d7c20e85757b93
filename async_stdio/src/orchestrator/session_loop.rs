// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AsyncStdio, AsyncStdioError, BACKGROUND_THREAD_NAME, CommonResult,
            DefaultInterruptBehavior, ExitCallback, InterruptWatcher, LineEditor,
            OutputGate, RunningFlag, ShutdownBridge};
use std::thread;

/// Run a session on the real terminal until it is stopped.
///
/// 1. `background_task` is started on its own thread, named
///    [`BACKGROUND_THREAD_NAME`]. It gets a clone of the [`OutputGate`] to print with,
///    and the [`ShutdownBridge`], whose [`ShutdownBridge::is_running()`] it should poll
///    (or use [`RunningFlag::sleep_while_running()`]) so that it returns promptly.
/// 2. The calling thread reads lines until the [`RunningFlag`] is cleared, and passes
///    each completed line to `line_handler`. A handler that wants to end the session
///    calls [`ShutdownBridge::stop()`].
/// 3. <kbd>Ctrl+C</kbd> invokes `on_exit`, restores the terminal, and exits the process
///    with [`crate::INTERRUPT_EXIT_CODE`]. See [`InterruptWatcher`].
///
/// `on_exit` is also invoked by every call to [`ShutdownBridge::stop()`].
///
/// # Errors
///
/// Any [`AsyncStdioError`] from setting up the terminal or from the foreground loop. The
/// terminal has been restored, and the background thread joined, before this returns.
pub fn run<B, L>(
    background_task: B,
    line_handler: L,
    on_exit: Option<ExitCallback>,
) -> miette::Result<()>
where
    B: FnOnce(OutputGate, ShutdownBridge) + Send + 'static,
    L: FnMut(String, &OutputGate, &ShutdownBridge),
{
    let session = AsyncStdio::try_new_stdio()?;
    run_session(session, background_task, line_handler, on_exit)
}

/// Same as [`run()`], for a session that was created up front. This is useful to get
/// hold of [`AsyncStdio::gate`] before the session starts, for example to route log
/// output through it with [`crate::DisplayPreference::Gate`].
///
/// # Errors
///
/// See [`run()`].
pub fn run_session<B, L>(
    session: AsyncStdio,
    background_task: B,
    line_handler: L,
    on_exit: Option<ExitCallback>,
) -> miette::Result<()>
where
    B: FnOnce(OutputGate, ShutdownBridge) + Send + 'static,
    L: FnMut(String, &OutputGate, &ShutdownBridge),
{
    let default_interrupt = DefaultInterruptBehavior::try_register()?;
    let bridge = ShutdownBridge::new(RunningFlag::new(), on_exit, default_interrupt);

    let watcher = InterruptWatcher::try_spawn(
        bridge.clone(),
        session.line_editor.terminal_mode.restorer(),
        |exit_code| std::process::exit(exit_code),
    )?;

    let result = run_with(session, bridge.clone(), background_task, line_handler);

    watcher.disarm();
    // Ctrl+C should behave normally again once the session is over.
    bridge.default_interrupt().restore();

    Ok(result?)
}

/// The loop behind [`run()`] and [`run_session()`], with every dependency passed in. This does not subscribe
/// to any signal, so the caller decides how (or whether) interrupts reach `bridge`.
///
/// # Errors
///
/// - Any error from [`crate::LineEditor::read_line()`]. The running flag is cleared
///   (without invoking the exit callback) and the background thread is joined before
///   this returns.
/// - [`AsyncStdioError::ThreadSpawn`] if the background thread can't be started.
/// - [`AsyncStdioError::BackgroundTaskPanicked`] if the background task panicked.
pub fn run_with<B, L>(
    session: AsyncStdio,
    bridge: ShutdownBridge,
    background_task: B,
    mut line_handler: L,
) -> CommonResult<()>
where
    B: FnOnce(OutputGate, ShutdownBridge) + Send + 'static,
    L: FnMut(String, &OutputGate, &ShutdownBridge),
{
    let AsyncStdio {
        gate,
        mut line_editor,
    } = session;

    let join_handle = {
        let gate = gate.clone();
        let bridge = bridge.clone();
        thread::Builder::new()
            .name(BACKGROUND_THREAD_NAME.into())
            .spawn(move || background_task(gate, bridge))
            .map_err(|source| AsyncStdioError::ThreadSpawn {
                name: BACKGROUND_THREAD_NAME.into(),
                source,
            })?
    };
    tracing::info!(message = "session started", background_thread = BACKGROUND_THREAD_NAME);

    let loop_result =
        read_lines_while_running(&mut line_editor, &gate, &bridge, &mut line_handler);

    if let Err(error) = &loop_result {
        tracing::warn!(message = "foreground loop failed", error = %error);
        bridge.running().stop();
    }

    let join_result = join_handle.join();
    tracing::info!(message = "session ended", running = %bridge.running().get());

    loop_result?;
    join_result.map_err(|_| AsyncStdioError::BackgroundTaskPanicked)
}

fn read_lines_while_running<L>(
    line_editor: &mut LineEditor,
    gate: &OutputGate,
    bridge: &ShutdownBridge,
    line_handler: &mut L,
) -> CommonResult<()>
where
    L: FnMut(String, &OutputGate, &ShutdownBridge),
{
    while bridge.is_running() {
        let line = line_editor.read_line()?;
        line_handler(line, gate, bridge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputDevice, InputDeviceExt, Liveness, ModeTransition, OutputDevice,
                OutputDeviceExt, ScriptedInput, TerminalModeController,
                TerminalModeControllerExt};
    use pretty_assertions::assert_eq;
    use std::{io::Read,
              sync::{Arc,
                     atomic::{AtomicUsize, Ordering},
                     mpsc},
              time::Duration};

    fn mock_session(keys: &str) -> (AsyncStdio, crate::StdoutMock, crate::ModeTransitionLog) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (terminal_mode, log) = TerminalModeController::new_mock();
        let session = AsyncStdio::new(
            InputDevice::new_mock_from_keys(keys),
            output_device,
            terminal_mode,
        );
        (session, stdout_mock, log)
    }

    fn detached_bridge(on_exit: Option<ExitCallback>) -> ShutdownBridge {
        ShutdownBridge::new(
            RunningFlag::new(),
            on_exit,
            DefaultInterruptBehavior::new_detached(),
        )
    }

    fn echo_until_quit(line: String, gate: &OutputGate, bridge: &ShutdownBridge) {
        if line == "quit" {
            bridge.stop();
        } else {
            gate.acquire().unwrap().println(&format!("got {line}")).unwrap();
        }
    }

    #[test]
    fn test_lines_are_handled_until_stop() {
        let (session, stdout_mock, log) = mock_session("a\nbc\nquit\nnever\n");
        let exit_count = Arc::new(AtomicUsize::new(0));
        let on_exit: ExitCallback = {
            let exit_count = exit_count.clone();
            Arc::new(move || {
                exit_count.fetch_add(1, Ordering::SeqCst);
            })
        };
        let bridge = detached_bridge(Some(on_exit));

        run_with(session, bridge.clone(), |_, _| {}, echo_until_quit).unwrap();

        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "a\ngot a\nbc\ngot bc\nquit\n"
        );
        assert_eq!(exit_count.load(Ordering::SeqCst), 1);
        assert!(!bridge.is_running());
        assert_eq!(
            log.get_copy(),
            [ModeTransition::EnterRaw, ModeTransition::RestoreOriginal].repeat(3)
        );
    }

    #[test]
    fn test_background_task_gets_gate_and_exits_on_stop() {
        let (session, stdout_mock, _log) = mock_session("quit\n");
        let bridge = detached_bridge(None);
        let background_task = |gate: OutputGate, bridge: ShutdownBridge| {
            gate.acquire().unwrap().println("[bg]").unwrap();
            while bridge.running().sleep_while_running(Duration::from_millis(5))
                == Liveness::Running
            {}
        };

        run_with(session, bridge, background_task, echo_until_quit).unwrap();

        assert!(stdout_mock.get_copy_of_buffer_as_string().contains("[bg]\n"));
    }

    #[test]
    fn test_read_error_stops_background_and_propagates() {
        let (session, _stdout_mock, log) = mock_session("a\npartial");
        let bridge = detached_bridge(None);
        let handled_lines = Arc::new(AtomicUsize::new(0));

        let result = run_with(
            session,
            bridge.clone(),
            |_gate: OutputGate, bridge: ShutdownBridge| {
                while bridge.running().sleep_while_running(Duration::from_secs(30))
                    == Liveness::Running
                {}
            },
            {
                let handled_lines = handled_lines.clone();
                move |_line: String, _gate: &OutputGate, _bridge: &ShutdownBridge| {
                    handled_lines.fetch_add(1, Ordering::SeqCst);
                }
            },
        );

        assert!(matches!(result, Err(AsyncStdioError::InputClosed { .. })));
        assert_eq!(handled_lines.load(Ordering::SeqCst), 1);
        assert!(!bridge.is_running());
        assert!(!log.is_raw());
    }

    #[test]
    fn test_background_panic_is_reported() {
        let (session, _stdout_mock, _log) = mock_session("quit\n");
        let bridge = detached_bridge(None);

        let result = run_with(
            session,
            bridge,
            |_gate: OutputGate, _bridge: ShutdownBridge| panic!("background task blew up"),
            echo_until_quit,
        );

        assert!(matches!(result, Err(AsyncStdioError::BackgroundTaskPanicked)));
    }

    /// Holds back the first key press until the sending half of `go_ahead` is dropped.
    struct WaitsForBackgroundTask {
        go_ahead: Option<mpsc::Receiver<()>>,
        keys: ScriptedInput,
    }

    impl Read for WaitsForBackgroundTask {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if let Some(go_ahead) = self.go_ahead.take() {
                let _unused = go_ahead.recv();
            }
            self.keys.read(buf)
        }
    }

    #[test]
    fn test_background_panic_while_holding_gate_is_reported() {
        let (go_ahead_sender, go_ahead) = mpsc::channel::<()>();
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let (terminal_mode, log) = TerminalModeController::new_mock();
        let keys = ScriptedInput::new(b"quit\n".iter().map(|byte| vec![*byte]).collect());
        let input_device = InputDevice {
            resource: Box::new(WaitsForBackgroundTask {
                go_ahead: Some(go_ahead),
                keys,
            }),
            is_mock: true,
        };
        let session = AsyncStdio::new(input_device, output_device, terminal_mode);

        let result = run_with(
            session,
            detached_bridge(None),
            move |gate: OutputGate, _bridge: ShutdownBridge| {
                // Dropped after the guard while unwinding, so the gate is already
                // poisoned when the foreground reads its first key.
                let _go_ahead_sender = go_ahead_sender;
                let mut guard = gate.acquire().unwrap();
                guard.puts("[bg]").unwrap();
                panic!("background task panicked while holding the gate");
            },
            echo_until_quit,
        );

        assert!(matches!(result, Err(AsyncStdioError::BackgroundTaskPanicked)));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "[bg]quit\n");
        assert!(!log.is_raw());
    }
}
