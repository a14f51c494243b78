// src/utils/mod.rs
use log::{info, LevelFilter};

pub mod timing;

/// `redis` and `calamine` log at most at `Warn`, and never above `level`.
pub(crate) fn library_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

/// The formatted dispatcher without an output attached.
pub fn log_dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("redis", library_level(level))
        .level_for("calamine", library_level(level))
}

pub fn setup_logging(level: LevelFilter) -> Result<(), fern::InitError> {
    log_dispatch(level)
        // stdout belongs to the demo output
        .chain(std::io::stderr())
        .apply()?;
    info!("Logging initialized.");
    Ok(())
}

/// Prints a section title followed by a rule of `=` characters.
pub fn print_banner(title: &str, width: usize) {
    println!("\n{}", title);
    println!("{}", rule(width));
}

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule(5), "=====");
        assert!(rule(0).is_empty());
    }

    #[test]
    fn library_logs_never_exceed_the_app_level() {
        assert_eq!(library_level(LevelFilter::Debug), LevelFilter::Warn);
        assert_eq!(library_level(LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(library_level(LevelFilter::Error), LevelFilter::Error);
        assert_eq!(library_level(LevelFilter::Off), LevelFilter::Off);
    }
}
