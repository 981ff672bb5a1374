//! Tracing setup for the browser. Events are formatted by `tracing-subscriber`
//! and written by `tracing-web` to the console method matching their level.
//! Callers must not put tokens or passwords in event fields.

use tracing::Level;

/// Parses a level name (`error`..`trace`) or a number (`0`..`4`).
pub fn parse_log_level(level: &str) -> Result<Level, String> {
    if let Ok(parsed) = level.trim().parse::<u8>() {
        return match parsed {
            0 => Ok(Level::ERROR),
            1 => Ok(Level::WARN),
            2 => Ok(Level::INFO),
            3 => Ok(Level::DEBUG),
            4 => Ok(Level::TRACE),
            _ => Err("invalid log level".to_string()),
        };
    }

    match level.trim().to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err("invalid log level".to_string()),
    }
}

/// Installs the console subscriber and the panic hook. Safe to call once per page.
#[cfg(target_arch = "wasm32")]
pub fn init(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
    use tracing_web::MakeWebConsoleWriter;

    console_error_panic_hook::set_once();

    let (directive, invalid) = filter_directive(level);
    let filter = EnvFilter::new(directive);
    // Browsers have no usable clock for the fmt timer and render ANSI as text.
    let layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(MakeWebConsoleWriter::new());

    if tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_err()
    {
        return;
    }

    if invalid {
        tracing::warn!(value = %level, "invalid log level, using info");
    }
}

/// `EnvFilter` directive scoping the configured level to this crate, and
/// whether the configured value had to be replaced by `info`.
fn filter_directive(level: &str) -> (String, bool) {
    let (level, invalid) = match parse_log_level(level) {
        Ok(level) => (level, false),
        Err(_) => (Level::INFO, true),
    };
    (format!("{}={level}", env!("CARGO_CRATE_NAME")), invalid)
}

#[cfg(test)]
mod tests {
    use super::{filter_directive, parse_log_level};
    use tracing::Level;

    #[test]
    fn parse_log_level_accepts_names() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        let expected = [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ];
        for (name, level) in levels.iter().zip(expected) {
            assert_eq!(parse_log_level(name), Ok(level));
            assert_eq!(parse_log_level(&name.to_uppercase()), Ok(level));
        }
    }

    #[test]
    fn parse_log_level_accepts_numbers() {
        for (index, level) in [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ]
        .into_iter()
        .enumerate()
        {
            assert_eq!(parse_log_level(&index.to_string()), Ok(level));
        }
    }

    #[test]
    fn filter_directive_scopes_level_to_crate() {
        assert_eq!(
            filter_directive("debug"),
            ("quill_web=DEBUG".to_string(), false)
        );
        assert_eq!(filter_directive("0"), ("quill_web=ERROR".to_string(), false));
        assert_eq!(
            filter_directive("loud"),
            ("quill_web=INFO".to_string(), true)
        );
    }

    #[test]
    fn parse_log_level_rejects_unknown_values() {
        assert!(parse_log_level("5").is_err());
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }
}
