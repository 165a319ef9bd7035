use std::fmt::{Arguments, Display};

use colored::Colorize;
use fern::FormatCallback;
use log::{Level, LevelFilter, Record, SetLoggerError};

/// The crates of this workspace, as they appear in log targets
const LOCAL_CRATES: [&str; 4] = [
    "hotelseed",
    "hotelseed_core",
    "hotelseed_store",
    "hotelseed_pipeline",
];

/// Installs the global logger.
///
/// Local crates log from info, or from debug with `verbose`, which adds every
/// store write and the records each phase generated. Everything else only logs
/// warnings and errors.
pub fn init_logger(verbose: bool) -> Result<(), SetLoggerError> {
    let local_level = local_level(verbose);

    LOCAL_CRATES
        .into_iter()
        .fold(
            fern::Dispatch::new()
                .format(format_record)
                .level(LevelFilter::Warn),
            |dispatch, name| dispatch.level_for(name, local_level),
        )
        .chain(std::io::stdout())
        .apply()
}

fn local_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn format_record(out: FormatCallback, message: &Arguments, record: &Record) {
    let target = Target::from_str(record.target());
    let now = chrono::Local::now().format("%H:%M:%S").to_string();

    // Debug lines come from deep inside a crate, so name the module too
    if record.level() == Level::Debug {
        out.finish(format_args!(
            "{:^5} {} {:^8} {} {}",
            level_to_string(&record.level()),
            now.bright_black(),
            target,
            message,
            record.target().bright_black()
        ))
    } else {
        out.finish(format_args!(
            "{:^5} {} {:^8} {}",
            level_to_string(&record.level()),
            now.bright_black(),
            target,
            message
        ))
    }
}

#[derive(Debug, PartialEq)]
enum Target {
    External(String),
    Cli,
    Seed,
    Store,
    Core,
}

impl Target {
    fn from_str(str: &str) -> Self {
        let module = str.split("::").next().unwrap_or_default();

        match module {
            "hotelseed" => Self::Cli,
            "hotelseed_pipeline" => Self::Seed,
            "hotelseed_store" => Self::Store,
            "hotelseed_core" => Self::Core,
            other => Target::External(other.to_string()),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::Cli => "CLI".bright_green(),
            Target::Seed => "SEED".bright_purple(),
            Target::Store => "STORE".yellow(),
            Target::Core => "CORE".blue(),
        };

        Display::fmt(&result, f)
    }
}

fn level_to_string(level: &Level) -> String {
    match level {
        Level::Error => " ERR ".black().on_red().bold().to_string(),
        Level::Warn => " WRN ".black().on_yellow().bold().to_string(),
        Level::Info => " INF ".black().on_blue().bold().to_string(),
        Level::Debug => " DBG ".white().on_black().to_string(),
        Level::Trace => " TRC ".to_string(),
    }
}

#[cfg(test)]
mod test {
    use log::LevelFilter;

    use super::{local_level, Target, LOCAL_CRATES};

    #[test]
    fn targets_are_resolved_by_crate() {
        assert_eq!(Target::from_str("hotelseed_pipeline::seeder"), Target::Seed);
        assert_eq!(Target::from_str("hotelseed"), Target::Cli);
        assert_eq!(
            Target::from_str("surrealdb::api"),
            Target::External("surrealdb".to_string())
        );
    }

    #[test]
    fn every_local_crate_has_a_label() {
        for name in LOCAL_CRATES {
            assert!(
                !matches!(Target::from_str(name), Target::External(_)),
                "{name} is treated as external"
            );
        }
    }

    #[test]
    fn verbose_enables_debug_for_local_crates() {
        assert_eq!(local_level(false), LevelFilter::Info);
        assert_eq!(local_level(true), LevelFilter::Debug);
    }
}
