//! Miette-based error diagnostics for CLI error presentation.
//!
//! Turns crate errors into rich reports: TOML parse errors point at the
//! offending span in the configuration file, everything else gets a help
//! line suggesting the usual fix.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, SnapshotError};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tradelane::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

/// Any other failure, with an optional suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tradelane::error))]
pub struct CliDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Build a printable report for `error`.
///
/// `config_path` is re-read to show the failing span of a TOML parse error.
pub fn report(error: &Error, config_path: Option<&Path>) -> miette::Report {
    if let (Error::Config(ConfigError::Parse(parse)), Some(path)) = (error, config_path) {
        if let (Some(span), Ok(content)) = (parse.span(), std::fs::read_to_string(path)) {
            return miette::Report::new(ConfigDiagnostic {
                message: format!("invalid configuration: {}", parse.message()),
                src: NamedSource::new(path.display().to_string(), content),
                span: (span.start, span.len()).into(),
                help: Some("see tradelane.toml.example for every supported key".into()),
            });
        }
    }

    miette::Report::new(CliDiagnostic {
        message: error.to_string(),
        help: help_for(error),
    })
}

fn help_for(error: &Error) -> Option<String> {
    let help = match error {
        Error::Config(ConfigError::MissingField {
            field: "input.items",
        }) => "single cargo mode needs an item table: set [input] items or pass --items",
        Error::Config(ConfigError::MissingField {
            field: "routes.table",
        }) => "route enrichment needs a route table: set [routes] table or pass --route-table",
        Error::Config(ConfigError::ReadFile(_)) => {
            "create one with `tradelane config init` or pass --config"
        }
        Error::Config(ConfigError::InvalidValue { .. }) => {
            "run `tradelane config show` to see the effective values"
        }
        Error::Snapshot(SnapshotError::Read { .. }) => {
            "check the [input] paths in the configuration or pass them as flags"
        }
        Error::Snapshot(SnapshotError::InvalidOrder { .. }) => {
            "the orders file must have positive prices and is_buy_order set to True or False"
        }
        Error::Lookup(_) => "use route_failure = \"exclude\" to skip unresolved pairs",
        _ => return None,
    };
    Some(help.to_string())
}
