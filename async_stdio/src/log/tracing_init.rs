// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayPreference, TracingConfig, WriterConfig, try_create_file_appender};
use miette::IntoDiagnostic;
use tracing::dispatcher::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, registry::LookupSpan, util::SubscriberInitExt,
                         layer::SubscriberExt};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer. The thread
/// name is included, since every session has at least a foreground and a background
/// thread.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_thread_names(true)
            .with_target(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Returns the layers. This does not initialize the tracing system. See
/// [`TracingConfig::install_global()`] and [`TracingConfig::install_thread_local()`].
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> =
        vec![Box::new(level_filter)];

    if let Some(layer) = try_create_display_layer(level_filter, &writer_config) {
        layers.push(layer);
    }
    if let Some(layer) = try_create_file_layer(level_filter, &writer_config)? {
        layers.push(layer);
    }

    Ok(layers)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber + 'static,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _)
        | WriterConfig::Display(display_pref) => match display_pref {
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Gate(gate) => {
                let gate = gate.clone();
                let make_writer = move || gate.writer();
                Some(Box::new(
                    fmt_layer
                        .with_ansi(false)
                        .with_writer(make_writer)
                        .with_filter(level_filter),
                ))
            }
        },
        WriterConfig::None | WriterConfig::File(_) => None,
    }
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber + 'static,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, file_path) | WriterConfig::File(file_path) => {
            let file = try_create_file_appender(file_path.as_str())?;
            Some(Box::new(
                fmt_layer
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(level_filter),
            ))
        }
        WriterConfig::None | WriterConfig::Display(_) => None,
    })
}

impl TracingConfig {
    /// Set the global default subscriber. This can only be done once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if the layers can't be created, or a global default subscriber
    /// has already been set.
    pub fn install_global(&self) -> miette::Result<()> {
        let layers = try_create_layers(self)?;
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()
    }

    /// Set the default subscriber for the current thread, until the returned guard is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the layers can't be created.
    pub fn install_thread_local(&self) -> miette::Result<DefaultGuard> {
        let layers = try_create_layers(self)?;
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDevice, OutputDeviceExt, OutputGate};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_try_create_display_layer() {
        let writer_config = WriterConfig::Display(DisplayPreference::Stderr);
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, &writer_config);
        assert!(layer.is_some());
    }

    #[test]
    fn test_try_create_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("async_stdio.log");
        let file_path = file_path.to_str().unwrap().to_string();

        let writer_config = WriterConfig::File(file_path.clone());
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, &writer_config).unwrap();

        assert!(layer.is_some());
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_try_create_both_layers() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("async_stdio.log");
        let file_path = file_path.to_str().unwrap().to_string();

        let tracing_config = TracingConfig {
            writer_config: WriterConfig::DisplayAndFile(
                DisplayPreference::Stderr,
                file_path,
            ),
            level_filter: LevelFilter::DEBUG,
        };

        let layers = try_create_layers(&tracing_config).unwrap();
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_gate_display_redraws_pending_input() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let gate = OutputGate::new(output_device);
        gate.lock_without_erase().input_buffer.push('q');

        let tracing_config: TracingConfig =
            DisplayPreference::Gate(gate.clone()).into();
        let default_guard = tracing_config.install_thread_local().unwrap();

        tracing::info!("tick");
        tracing::trace!("filtered out");

        drop(default_guard);

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.starts_with("\x08 \x08"), "{output:?}");
        assert!(output.contains("tick"), "{output:?}");
        assert!(!output.contains("filtered out"), "{output:?}");
        assert!(output.ends_with("\nq"), "{output:?}");
    }
}
