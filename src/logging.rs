use anyhow::Result;
use tracing::{Level, subscriber};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Log level selected by the number of `-v` flags
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` wins over the `-v` count when it parses
fn filter_for(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).to_string()))
}

/// Install the global subscriber. Everything is written to stderr because
/// stdout is reserved for the metadata document.
pub fn init(verbose: u8) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_file(verbose >= 3)
        .with_line_number(verbose >= 3)
        .compact()
        .finish();

    subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(3), Level::TRACE);
        assert_eq!(level_for(u8::MAX), Level::TRACE);
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_verbosity() {
        let original = env::var_os("RUST_LOG");

        unsafe {
            env::remove_var("RUST_LOG");
        }
        assert_eq!(filter_for(1).max_level_hint(), Some(LevelFilter::INFO));

        unsafe {
            env::set_var("RUST_LOG", "sp_onboard=trace");
        }
        assert_eq!(filter_for(0).max_level_hint(), Some(LevelFilter::TRACE));

        unsafe {
            match original {
                Some(val) => env::set_var("RUST_LOG", val),
                None => env::remove_var("RUST_LOG"),
            }
        }
    }
}
