//! CLI error types with miette diagnostics and exit codes.

use miette::Diagnostic;
use thiserror::Error;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const ACTION_REJECTED: i32 = 5;
    pub const RATE_LIMITED: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("no API key configured")]
    #[diagnostic(
        code(olarm::no_api_key),
        help(
            "Pass --api-key, set OLARM_API_KEY, or put `api_key = \"...\"` in the config file."
        )
    )]
    MissingApiKey,

    #[error("config loading failed: {0}")]
    #[diagnostic(code(olarm::config))]
    Config(#[source] Box<figment::Error>),

    #[error(transparent)]
    #[diagnostic(code(olarm::api))]
    Api(#[from] olarm_api::Error),

    #[error("the Olarm API rejected the {action} action")]
    #[diagnostic(
        code(olarm::action_rejected),
        help("Check the area/zone/PGM number and that the panel is ready; see logs with -v.")
    )]
    ActionRejected { action: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey => exit_code::AUTH,
            Self::ActionRejected { .. } => exit_code::ACTION_REJECTED,
            Self::Api(e) if e.is_auth_failure() => exit_code::AUTH,
            Self::Api(e) if e.is_rate_limited() => exit_code::RATE_LIMITED,
            _ => exit_code::GENERAL,
        }
    }
}
