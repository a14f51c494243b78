use redis_excel::config::{start_with, Config};
use redis_excel::error::DemoError;
use redis_excel::utils::log_dispatch;
use std::sync::mpsc;

fn config_with(pairs: &'static [(&'static str, &'static str)]) -> Config {
    Config::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}

// The only test in this binary that installs a global logger.
#[test]
fn configuration_is_logged_once_the_logger_is_installed() {
    let (tx, rx) = mpsc::channel::<String>();
    let config = config_with(&[("LOG_LEVEL", "info"), ("REDIS_PASSWORD", "hunter2")]);

    let config = start_with(config, |level| {
        log_dispatch(level).chain(tx).apply()?;
        Ok(())
    })
    .unwrap();
    assert_eq!(config.log_level_filter(), log::LevelFilter::Info);

    let lines: Vec<String> = rx.try_iter().collect();
    let loaded = lines
        .iter()
        .find(|l| l.contains("Application Configuration Loaded"))
        .expect("configuration line was logged");
    assert!(loaded.starts_with("[INFO]"));
    assert!(!loaded.contains("hunter2"));
}

#[test]
fn invalid_configuration_is_rejected_after_logger_setup() {
    let mut installed = false;
    let result = start_with(config_with(&[("MAX_ROWS", "0")]), |_| {
        installed = true;
        Ok(())
    });
    assert!(installed);
    assert!(matches!(result, Err(DemoError::Config(_))));
}
