// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::OutputGate;
use std::{fmt::{self, Debug},
          ops::Add};
use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "async_stdio_log.txt";

/// Where to log, and how much. Build one from any of the `From` impls below, and combine
/// them with `+`:
///
/// ```no_run
/// use r3bl_async_stdio::{DisplayPreference, TracingConfig, WriterConfig};
///
/// let config_1: TracingConfig = tracing::Level::DEBUG.into();
/// let config_2: TracingConfig = DisplayPreference::Stderr.into();
/// let config_3: TracingConfig = WriterConfig::File("log.txt".to_string()).into();
///
/// let config_compose: TracingConfig = config_1 + config_2 + config_3;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub writer_config: WriterConfig,
}

/// The `String` in `File` and `DisplayAndFile` is the path of the log file.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Clone)]
pub enum DisplayPreference {
    Stderr,
    /// Print each log line through the gate, so the pending input is erased and
    /// redrawn around it.
    Gate(OutputGate),
}

impl Debug for DisplayPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPreference::Stderr => write!(f, "Stderr"),
            DisplayPreference::Gate(_) => write!(f, "Gate"),
        }
    }
}

/// Two `Gate` preferences are equal when they guard the same terminal.
impl PartialEq for DisplayPreference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DisplayPreference::Stderr, DisplayPreference::Stderr) => true,
            (DisplayPreference::Gate(lhs), DisplayPreference::Gate(rhs)) => {
                lhs.is_same_gate(rhs)
            }
            _ => false,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// The more verbose level filter wins. Writer configs are merged with
/// [`WriterConfig`]'s `Add`.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two [`WriterConfig`]s. Fields that don't collide are combined. On a collision
/// the `rhs` wins, since it has higher specificity:
/// - `{a: "foo"} + {a: "bar"} = {a: "bar"}`.
/// - `{a: None } + {a: "bar"} = {a: "bar"}`.
/// - `{a: "foo"} + {a: None } = {a: "foo"}`.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            (None, rhs) => rhs,
            (lhs, None) => lhs,
            (Display(display), File(file)) | (File(file), Display(display)) => {
                DisplayAndFile(display, file)
            }
            (Display(_), Display(display)) => Display(display),
            (File(_), File(file)) => File(file),
            (DisplayAndFile(_, file), Display(display)) => DisplayAndFile(display, file),
            (DisplayAndFile(display, _), File(file)) => DisplayAndFile(display, file),
            (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(display, file)) => {
                DisplayAndFile(display, file)
            }
        }
    }
}
