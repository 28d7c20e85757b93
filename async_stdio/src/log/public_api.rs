// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::TracingConfig;
use tracing::dispatcher::DefaultGuard;
use tracing_core::LevelFilter;

/// Global default subscriber, which once set, can't be unset or changed. This is what
/// an app wants.
///
/// Logging is **DISABLED** by **default**. Passing a config whose level filter is
/// [`LevelFilter::OFF`] leaves it disabled.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or a global default subscriber
/// has already been set.
pub fn try_initialize_logging_global(
    options: impl Into<TracingConfig>,
) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    if it.get_level_filter() == LevelFilter::OFF {
        return Ok(());
    }

    it.install_global()
}

/// Thread local subscriber, active until the returned guard is dropped. This is what a
/// test wants. Returns `None` if the level filter is [`LevelFilter::OFF`].
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<DefaultGuard>> {
    let it: TracingConfig = options.into();

    if it.get_level_filter() == LevelFilter::OFF {
        return Ok(None);
    }

    it.install_thread_local().map(Some)
}
