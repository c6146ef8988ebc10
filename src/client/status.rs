//! Human-readable status reporting.

use serde::Serialize;

use super::config::VibexConfig;
use super::state::{ClientState, DisableReason};

const VISIBLE_TOKEN_CHARS: usize = 6;
const PREFIX_CHARS: usize = 10;
const BANNER_FIELD_WIDTH: usize = 48;
const BANNER_RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Snapshot of a client's state for introspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientStatus {
    pub enabled: bool,
    /// Disabled at construction because of missing configuration.
    pub disabled: bool,
    /// Disabled by the kill switch.
    pub disabled_permanently: bool,
    pub config_valid: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_config: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_prefix: Option<String>,
}

impl ClientStatus {
    pub(crate) fn capture(config: &VibexConfig, state: ClientState) -> Self {
        let mut status = Self {
            enabled: state.is_enabled(),
            disabled: state == ClientState::Disabled(DisableReason::InvalidConfig),
            disabled_permanently: state == ClientState::Disabled(DisableReason::Killed),
            config_valid: config.is_valid(),
            reason: String::new(),
            missing_config: None,
            api_url: None,
            session_id: None,
            token_prefix: None,
        };
        match state {
            ClientState::Disabled(DisableReason::InvalidConfig) => {
                let missing: Vec<String> = config.missing().into_iter().map(String::from).collect();
                status.reason = format!("Missing configuration: {}", missing.join(", "));
                status.missing_config = Some(missing);
            }
            ClientState::Disabled(DisableReason::Killed) => {
                status.reason =
                    "Permanently disabled due to authentication error (401/403)".to_owned();
            }
            ClientState::Enabled => {
                status.reason = "Enabled and ready".to_owned();
                status.api_url = Some(config.api_url().to_owned());
                status.session_id = config.session_id().map(abbreviate);
                status.token_prefix = config.token().map(abbreviate);
            }
        }
        status
    }

    /// One-line summary suitable for the console.
    pub fn summary(&self) -> String {
        if self.enabled {
            "Vibex SDK: Enabled and ready".to_owned()
        } else {
            format!("Vibex SDK: {}", self.reason)
        }
    }
}

fn abbreviate(value: &str) -> String {
    let prefix: String = value.chars().take(PREFIX_CHARS).collect();
    format!("{prefix}...")
}

/// Show the first six characters of a token and mask the rest.
///
/// Tokens of six characters or fewer are masked entirely.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= VISIBLE_TOKEN_CHARS {
        return "*".repeat(VISIBLE_TOKEN_CHARS);
    }
    let visible: String = token.chars().take(VISIBLE_TOKEN_CHARS).collect();
    format!("{visible}{}", "*".repeat(len - VISIBLE_TOKEN_CHARS))
}

fn banner_field(value: &str) -> String {
    let truncated: String = value.chars().take(BANNER_FIELD_WIDTH).collect();
    format!("{truncated:<width$}", width = BANNER_FIELD_WIDTH)
}

/// Startup banner announcing where logs are shipped.
pub(crate) fn startup_banner(config: &VibexConfig) -> Vec<String> {
    let token = config.token().map(mask_token).unwrap_or_default();
    vec![
        String::new(),
        format!("{:^63}", "vibex.sh is in action"),
        BANNER_RULE.to_owned(),
        format!("Server:  {}", banner_field(config.api_url())),
        format!("Session: {}", banner_field(config.session_id().unwrap_or_default())),
        format!("Token:   {}", banner_field(&token)),
        BANNER_RULE.to_owned(),
        String::new(),
    ]
}
