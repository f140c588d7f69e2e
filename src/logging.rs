//! Stderr backend for the `log` facade, used by the simulator and by hosts
//! that bring no logger of their own.
//!
//! `DUO_GAMES_LOG` holds comma-separated directives, each a bare level
//! (`debug`) or `target=level` (`duo_games::store=trace`). The longest target
//! prefix matching a record wins; otherwise the bare level applies, `info` if
//! none was given.

#![cfg(feature = "std")]

use std::env;
use std::sync::OnceLock;

use log::{LevelFilter, Metadata, Record};

pub const LOG_ENV: &str = "DUO_GAMES_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    target: Option<String>,
    level: LevelFilter,
}

/// Unparseable directives are skipped.
fn parse_directives(filters: &str) -> Vec<Directive> {
    filters.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.split_once('=') {
            Some((target, level)) => Some(Directive {
                target: Some(target.trim().to_string()),
                level: level.trim().parse().ok()?,
            }),
            None => Some(Directive {
                target: None,
                level: part.parse().ok()?,
            }),
        })
        .collect()
}

struct GameLogger {
    directives: Vec<Directive>,
}

impl GameLogger {
    fn from_env() -> Self {
        let filters = env::var(LOG_ENV).unwrap_or_default();
        GameLogger {
            directives: parse_directives(&filters),
        }
    }

    fn default_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .rev()
            .find(|d| d.target.is_none())
            .map_or(LevelFilter::Info, |d| d.level)
    }

    fn level_for(&self, target: &str) -> LevelFilter {
        self.directives
            .iter()
            .filter_map(|d| d.target.as_deref().map(|t| (t, d.level)))
            .filter(|(t, _)| target.starts_with(t))
            .max_by_key(|(t, _)| t.len())
            .map_or_else(|| self.default_level(), |(_, level)| level)
    }

    fn max_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .map(|d| d.level)
            .chain([self.default_level()])
            .max()
            .unwrap_or(LevelFilter::Info)
    }
}

impl log::Log for GameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<GameLogger> = OnceLock::new();

/// Install the stderr logger configured from `DUO_GAMES_LOG`. Later calls,
/// or calls after another logger was installed, do nothing.
pub fn init_logging() {
    let logger = LOGGER.get_or_init(GameLogger::from_env);
    let _ = log::set_logger(logger).map(|()| log::set_max_level(logger.max_level()));
}
