//! Builder for [`VibexHandler`](super::VibexHandler).

use std::sync::Arc;

use crate::{
    client::{
        BuildError, ClientState, DisableReason, VibexClient, VibexClientBuilder, VibexConfig,
    },
    console::ConsoleSink,
    formatter::{RecordFormatter, SharedFormatter},
};

use super::VibexHandler;

/// Builder for constructing [`VibexHandler`] instances.
///
/// Defaults: console passthrough on, passthrough-on-failure off, quiet.
/// When no client is supplied one is built from the configuration (or the
/// environment) using the client options set here. An explicit
/// [`with_verbose`](Self::with_verbose) overrides the verbosity chosen in
/// the client options.
#[derive(Clone, Debug)]
pub struct VibexHandlerBuilder {
    client: Option<Arc<VibexClient>>,
    client_options: VibexClientBuilder,
    console: Option<ConsoleSink>,
    formatter: Option<SharedFormatter>,
    passthrough_console: bool,
    passthrough_on_failure: bool,
    verbose: Option<bool>,
}

impl Default for VibexHandlerBuilder {
    fn default() -> Self {
        Self {
            client: None,
            client_options: VibexClientBuilder::new(),
            console: None,
            formatter: None,
            passthrough_console: true,
            passthrough_on_failure: false,
            verbose: None,
        }
    }
}

impl VibexHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing client (and its kill switch) with this handler.
    pub fn with_client(mut self, client: Arc<VibexClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Use an explicit configuration instead of the environment.
    pub fn with_config(mut self, config: VibexConfig) -> Self {
        self.client_options = self.client_options.with_config(config);
        self
    }

    /// Customise the client built by this builder.
    pub fn with_client_options(
        mut self,
        configure: impl FnOnce(VibexClientBuilder) -> VibexClientBuilder,
    ) -> Self {
        self.client_options = configure(self.client_options);
        self
    }

    /// Write passthrough lines somewhere other than stderr.
    pub fn with_console(mut self, console: ConsoleSink) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: RecordFormatter + 'static,
    {
        self.formatter = Some(SharedFormatter::new(formatter));
        self
    }

    /// Always echo records to the console before shipping them.
    pub fn with_passthrough_console(mut self, enabled: bool) -> Self {
        self.passthrough_console = enabled;
        self
    }

    /// Echo records whose send did not succeed.
    ///
    /// Only consulted when console passthrough is off.
    pub fn with_passthrough_on_failure(mut self, enabled: bool) -> Self {
        self.passthrough_on_failure = enabled;
        self
    }

    /// Print client diagnostics, including why the client is disabled.
    ///
    /// With a shared client from [`with_client`](Self::with_client) the
    /// client keeps its own verbosity; the handler only reports missing
    /// configuration on its console.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn build(self) -> Result<VibexHandler, BuildError> {
        let console = self.console.unwrap_or_default();
        let client = match self.client {
            Some(client) => {
                if self.verbose == Some(true) {
                    report_shared_disabled(&client, &console);
                }
                client
            }
            None => {
                let options = match self.verbose {
                    Some(verbose) => self.client_options.with_verbose(verbose),
                    None => self.client_options,
                };
                Arc::new(options.build()?)
            }
        };
        Ok(VibexHandler::from_parts(
            client,
            console,
            self.formatter.unwrap_or_default(),
            self.passthrough_console,
            self.passthrough_on_failure,
        ))
    }
}

fn report_shared_disabled(client: &VibexClient, console: &ConsoleSink) {
    if client.state() == ClientState::Disabled(DisableReason::InvalidConfig) {
        console.write_line(&format!(
            "Vibex SDK disabled: Missing configuration: {}",
            client.config().missing().join(", ")
        ));
    }
}
