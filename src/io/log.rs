use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Stdout belongs to the terminal UI, so events go to `log_file` when one is
/// given and are discarded otherwise. The filter comes from `RUST_LOG` and
/// defaults to `info`. Calling this more than once is harmless.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_with_unwritable_path_fails() {
        let tmp = TempDir::new().unwrap();
        let missing_dir = tmp.path().join("no/such/dir/log.txt");
        assert!(init_logging(Some(&missing_dir)).is_err());
    }

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init_logging(None).is_ok());
        assert!(init_logging(None).is_ok());
    }
}
