//! Almanac integration test support.
//!
//! Re-exports the workspace crates under one path so integration tests read
//! `almanac_test::component::ical::…`, and installs a log subscriber driven by the
//! `[logging]` section of the configuration.

pub mod component {
    pub use almanac_core::{config, constants, error};

    pub mod ical {
        pub use almanac_rfc::error::{RfcError, RfcResult};
        pub use almanac_rfc::rfc::ical::*;
    }
}

pub mod logging {
    use almanac_core::config::LoggingConfig;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    /// ## Summary
    /// Installs a test-friendly subscriber filtered by `config.level`.
    ///
    /// Only the first call in a test binary installs anything; later calls are no-ops.
    pub fn init(config: &LoggingConfig) {
        let filter = EnvFilter::try_new(config.level.as_str());
        let fallback = filter.is_err();

        let installed = tracing_subscriber::registry()
            .with(filter.unwrap_or_else(|_| EnvFilter::new("info")))
            .with(fmt::layer().with_test_writer().with_target(true))
            .try_init()
            .is_ok();

        if installed && fallback {
            tracing::warn!(level = %config.level, "Invalid log level in config, using info");
        }
    }
}
