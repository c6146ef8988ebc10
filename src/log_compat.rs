//! Compatibility bridge for the Rust `log` crate.
//!
//! [`VibexLogger`] implements `log::Log` and forwards each record to a
//! [`LogHandler`], usually a [`VibexHandler`](crate::VibexHandler). Install
//! it as the global logger with [`install`]:
//!
//! ```no_run
//! use vibex_sh::{VibexHandler, log_compat};
//!
//! log_compat::install(VibexHandler::new(), log::LevelFilter::Info)
//!     .expect("no other logger installed");
//! log::info!("{}", r#"{"cpu": 45, "memory": 78}"#);
//! ```

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::handler::LogHandler;
use crate::level::Level;
use crate::log_record::{LogRecord, RecordMetadata, is_internal_target, normalise_target};

/// Adapter implementing the Rust `log::Log` trait.
///
/// Records below the configured level and records emitted by this crate's
/// own diagnostics are ignored. Everything else is converted to a
/// [`LogRecord`] and handed to the wrapped handler on the calling thread.
pub struct VibexLogger<H> {
    handler: H,
    level: LevelFilter,
}

impl<H: LogHandler> VibexLogger<H> {
    /// Wrap `handler`, accepting records at `Info` and above.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            level: LevelFilter::Info,
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

fn convert(record: &Record<'_>) -> LogRecord {
    let metadata = RecordMetadata {
        module_path: record.module_path().unwrap_or_default().to_owned(),
        filename: record.file().unwrap_or_default().to_owned(),
        line_number: record.line().unwrap_or(0),
        ..Default::default()
    };
    LogRecord::with_metadata(
        normalise_target(record.target()).as_ref(),
        Level::from(record.level()),
        &record.args().to_string(),
        metadata,
    )
}

impl<H: LogHandler> log::Log for VibexLogger<H> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && !is_internal_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.handler.handle(&convert(record));
    }

    fn flush(&self) {}
}

/// Install `handler` as the global Rust logger.
///
/// Fails when a different global logger is already set. The global maximum
/// level is raised to `level` on success.
pub fn install<H>(handler: H, level: LevelFilter) -> Result<(), SetLoggerError>
where
    H: LogHandler + 'static,
{
    log::set_boxed_logger(Box::new(VibexLogger::new(handler).with_level(level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for the `log` crate bridge.

    use super::*;
    use crate::test_utils::CollectingHandler;
    use log::Log;
    use rstest::rstest;

    #[rstest]
    fn logger_forwards_records_with_source_location() {
        let handler = CollectingHandler::new();
        let logger = VibexLogger::new(handler.clone());

        let record = log::Record::builder()
            .args(format_args!(r#"{{"cpu": 45}}"#))
            .level(log::Level::Info)
            .target("bridge::test")
            .module_path(Some("bridge::test"))
            .file(Some("lib.rs"))
            .line(Some(42))
            .build();

        logger.log(&record);

        let records = handler.collected();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.logger(), "bridge.test");
        assert_eq!(rec.level(), Level::Info);
        assert_eq!(rec.message(), r#"{"cpu": 45}"#);
        assert_eq!(rec.metadata().module_path, "bridge::test");
        assert_eq!(rec.metadata().filename, "lib.rs");
        assert_eq!(rec.metadata().line_number, 42);
    }

    #[rstest]
    #[case(LevelFilter::Warn, log::Level::Info, false)]
    #[case(LevelFilter::Warn, log::Level::Error, true)]
    #[case(LevelFilter::Trace, log::Level::Trace, true)]
    #[case(LevelFilter::Off, log::Level::Error, false)]
    fn logger_respects_threshold(
        #[case] filter: LevelFilter,
        #[case] level: log::Level,
        #[case] forwarded: bool,
    ) {
        let handler = CollectingHandler::new();
        let logger = VibexLogger::new(handler.clone()).with_level(filter);

        logger.log(
            &log::Record::builder()
                .args(format_args!("{{}}"))
                .level(level)
                .target("app")
                .build(),
        );

        assert_eq!(handler.collected().len(), usize::from(forwarded));
    }

    #[rstest]
    #[case("vibex_sh")]
    #[case("vibex_sh::client")]
    fn logger_ignores_own_diagnostics(#[case] target: &str) {
        let handler = CollectingHandler::new();
        let logger = VibexLogger::new(handler.clone());

        logger.log(
            &log::Record::builder()
                .args(format_args!("Vibex SDK: dropping log"))
                .level(log::Level::Warn)
                .target(target)
                .build(),
        );

        assert!(handler.collected().is_empty());
        assert!(!logger.enabled(&Metadata::builder().target(target).build()));
    }
}
