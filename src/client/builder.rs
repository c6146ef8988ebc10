//! Builder for [`VibexClient`].
//!
//! Missing credentials are never a build error: they produce a client that
//! is disabled from the start. Only programmer errors, such as a zero
//! timeout, are rejected.

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{console::ConsoleSink, rate_limited_warner::RateLimitedWarner};

use super::{
    HttpTransport, Transport, VibexClient,
    config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, VibexConfig},
};

/// Errors that may occur while building a client or handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid vibex configuration: {0}")]
    InvalidConfig(String),
}

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

#[derive(Clone, Default)]
pub struct VibexClientBuilder {
    config: Option<VibexConfig>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    warn_interval: Option<Duration>,
    verbose: bool,
    diagnostics: Option<ConsoleSink>,
    transport: Option<Arc<dyn Transport>>,
}

impl VibexClientBuilder {
    /// Create a builder that reads the environment at build time.
    pub fn new() -> Self {
        Self::default()
    }

    option_setter!(
        #[doc = "Use an explicit configuration instead of the environment."]
        with_config,
        config,
        VibexConfig
    );
    option_setter!(
        #[doc = "Set the connect timeout in milliseconds."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the overall request timeout in milliseconds."]
        with_timeout_ms,
        request_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the minimum spacing between dropped-log warnings."]
        with_warn_interval,
        warn_interval,
        Duration
    );
    option_setter!(
        #[doc = "Send verbose messages somewhere other than stderr."]
        with_diagnostics,
        diagnostics,
        ConsoleSink
    );
    option_setter!(
        #[doc = "Replace the HTTP transport."]
        with_transport,
        transport,
        Arc<dyn Transport>
    );

    /// Print startup, kill and drop messages to the diagnostics sink.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.request_timeout_ms {
            ensure_positive!(timeout, "timeout_ms")?;
        }
        if let Some(interval) = self.warn_interval {
            ensure_positive!(interval.as_millis(), "warn_interval")?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<VibexClient, BuildError> {
        self.validate()?;
        let transport = self.transport.unwrap_or_else(|| {
            let connect = self
                .connect_timeout_ms
                .map_or(DEFAULT_CONNECT_TIMEOUT, Duration::from_millis);
            let request = self
                .request_timeout_ms
                .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_millis);
            Arc::new(HttpTransport::new(connect, request))
        });
        let warner = self
            .warn_interval
            .map_or_else(RateLimitedWarner::default, RateLimitedWarner::new);
        Ok(VibexClient::from_parts(
            self.config.unwrap_or_else(VibexConfig::from_env),
            transport,
            self.diagnostics.unwrap_or_default(),
            self.verbose,
            warner,
        ))
    }
}

impl std::fmt::Debug for VibexClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VibexClientBuilder")
            .field("config", &self.config)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("warn_interval", &self.warn_interval)
            .field("verbose", &self.verbose)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_API_URL;
    use rstest::rstest;

    fn valid_config() -> VibexConfig {
        VibexConfig::new(Some("tok"), Some("sess"), DEFAULT_API_URL)
    }

    #[rstest]
    #[case(VibexClientBuilder::new().with_timeout_ms(0), "timeout_ms must be greater than zero")]
    #[case(
        VibexClientBuilder::new().with_connect_timeout_ms(0),
        "connect_timeout_ms must be greater than zero"
    )]
    #[case(
        VibexClientBuilder::new().with_warn_interval(Duration::ZERO),
        "warn_interval must be greater than zero"
    )]
    fn rejects_zero_values(#[case] builder: VibexClientBuilder, #[case] message: &str) {
        let err = builder
            .with_config(valid_config())
            .build()
            .expect_err("zero value must be rejected");
        assert_eq!(err, BuildError::InvalidConfig(message.to_owned()));
    }

    #[rstest]
    fn missing_credentials_still_build_a_disabled_client() {
        let client = VibexClientBuilder::new()
            .with_config(VibexConfig::default())
            .build()
            .expect("build");
        assert!(!client.is_enabled());
    }

    #[rstest]
    fn explicit_config_is_used() {
        let client = VibexClientBuilder::new()
            .with_config(valid_config())
            .with_timeout_ms(250)
            .build()
            .expect("build");
        assert!(client.is_enabled());
        assert_eq!(client.config().session_id(), Some("sess"));
    }
}
