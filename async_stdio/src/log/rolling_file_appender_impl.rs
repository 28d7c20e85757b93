// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Create an appender that writes to `path_str` and never rotates. The file is created
/// (or appended to) right away.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create_file_appender(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't get the file name from {}. It must not end in `..` or `/`.",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => {
            return Err(miette::miette!(
                "Can't get the folder of {}. It might not exist.",
                path.display()
            ));
        }
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_file_in_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("async_stdio.log");
        let _appender = try_create_file_appender(file_path.to_str().unwrap()).unwrap();
        assert!(file_path.exists());
    }

    #[test]
    fn test_path_without_file_name_is_an_error() {
        assert!(try_create_file_appender("/").is_err());
    }
}
