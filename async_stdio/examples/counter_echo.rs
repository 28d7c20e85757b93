// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A counter ticks in the background while you type. Each line you enter is echoed
//! back reversed. Type `quit` or `exit` (or press <kbd>Ctrl+C</kbd>) to stop.
//!
//! ```text
//! cargo run --example counter_echo -- --tick-interval-ms 500 --log-display
//! ```

use clap::Parser;
use r3bl_async_stdio::{AsyncStdio, DisplayPreference, ExitCallback, Liveness,
                       OutputGate, ShutdownBridge, TracingConfig, WriterConfig,
                       run_session, try_initialize_logging_global};
use std::{str::FromStr, sync::Arc, time::Duration};

/// The counter wraps back to zero after this.
const COUNTER_MODULUS: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct CliArgs {
    /// Milliseconds between counter ticks.
    #[arg(long, default_value_t = 1000)]
    tick_interval_ms: u64,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<String>,

    /// Print logs on the terminal, above the prompt.
    #[arg(long)]
    log_display: bool,

    #[arg(long, default_value_t = tracing::Level::DEBUG)]
    log_level: tracing::Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
enum Command {
    Quit,
    Exit,
}

fn main() -> miette::Result<()> {
    let cli_args = CliArgs::parse();
    let session = AsyncStdio::try_new_stdio()?;

    let writer_config = match (cli_args.log_display, cli_args.log_file) {
        (true, Some(file)) => {
            WriterConfig::DisplayAndFile(DisplayPreference::Gate(session.gate.clone()), file)
        }
        (true, None) => WriterConfig::Display(DisplayPreference::Gate(session.gate.clone())),
        (false, Some(file)) => WriterConfig::File(file),
        (false, None) => WriterConfig::None,
    };
    if writer_config != WriterConfig::None {
        try_initialize_logging_global(
            TracingConfig::from(cli_args.log_level) + TracingConfig::from(writer_config),
        )?;
    }

    let tick_interval = Duration::from_millis(cli_args.tick_interval_ms);
    let on_exit = print_goodbye_on_exit(session.gate.clone());

    run_session(
        session,
        move |gate, bridge| print_counter(&gate, &bridge, tick_interval),
        process_line,
        Some(on_exit),
    )
}

/// On <kbd>Ctrl+C</kbd> the user may be in the middle of typing, so the goodbye goes
/// through the gate like every other message.
fn print_goodbye_on_exit(gate: OutputGate) -> ExitCallback {
    Arc::new(move || {
        if let Err(error) = gate.acquire().and_then(|mut guard| guard.println("Quitting!"))
        {
            tracing::error!(message = "failed to print goodbye", error = %error);
        }
    })
}

fn print_counter(gate: &OutputGate, bridge: &ShutdownBridge, tick_interval: Duration) {
    let mut count = 0;
    while bridge.is_running() {
        let result = gate
            .acquire()
            .and_then(|mut guard| guard.println(&format!("[{count:04}]")));
        if let Err(error) = result {
            tracing::error!(message = "counter failed to print", error = %error);
            return;
        }
        count = (count + 1) % COUNTER_MODULUS;

        if bridge.running().sleep_while_running(tick_interval) == Liveness::Stopped {
            return;
        }
    }
}

fn process_line(line: String, gate: &OutputGate, bridge: &ShutdownBridge) {
    let line = line.trim();
    if Command::from_str(line).is_ok() {
        bridge.stop();
        return;
    }

    let reversed = line.chars().rev().collect::<String>();
    if let Err(error) = gate.acquire().and_then(|mut guard| guard.println(&reversed)) {
        tracing::error!(message = "failed to echo line", error = %error);
    }
}
