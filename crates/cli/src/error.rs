//! CLI errors and their exit codes.
//!
//! - 0:  success
//! - 2:  clap argument error (before our code runs)
//! - 10: engine error (unknown engine, bad parameters, bad chart data)
//! - 11: I/O error (reading a seed or data file, writing output)
//! - 12: input error (malformed `--params`, seed file or chart data)
//! - 13: serialization error

use folio_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Engine(EngineError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Wraps a failure to parse user-supplied JSON, naming where it came from.
    pub fn bad_json(source: &str, e: serde_json::Error) -> Self {
        CliError::Input(format!("invalid JSON in {source}: {e}"))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            CliError::Engine(EngineError::UnknownEngine("comet".into())).exit_code(),
            CliError::Io("disk".into()).exit_code(),
            CliError::Input("params".into()).exit_code(),
            CliError::Serialization("json".into()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn engine_io_routes_to_cli_io() {
        let err = CliError::from(EngineError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn chart_errors_are_engine_errors() {
        let err = CliError::from(EngineError::InvalidChart("no bars".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("no bars"));
    }

    #[test]
    fn std_io_error_routes_to_io() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "seed.json"));
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn bad_json_is_an_input_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = CliError::bad_json("--params", parse);
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().starts_with("invalid JSON in --params"));
    }

    #[test]
    fn serde_error_defaults_to_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert_eq!(CliError::from(parse).exit_code(), 13);
    }
}
