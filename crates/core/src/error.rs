//! Error types shared by every folio crate.

use thiserror::Error;

/// Errors produced by engine construction, scheduling and output.
///
/// Stepping an engine is infallible in practice; these variants cover the
/// edges around it: bad configuration, unknown names, host failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, or a pixel buffer size overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A viewport was not strictly positive and finite.
    #[error("invalid viewport {width}x{height}: both sides must be finite and positive")]
    InvalidViewport { width: f64, height: f64 },

    /// A parameter value was present but breaks an engine invariant.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// No engine is registered under this name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Bar chart data cannot be laid out.
    #[error("invalid chart: {0}")]
    InvalidChart(String),

    /// The host frame scheduler refused a request or cancellation.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Writing a snapshot or reading an input file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_viewport_reports_both_sides() {
        let msg = EngineError::InvalidViewport {
            width: 0.0,
            height: 300.0,
        }
        .to_string();
        assert!(msg.contains("0x300"), "got: {msg}");
    }

    #[test]
    fn invalid_param_names_the_parameter_and_reason() {
        let msg = EngineError::invalid_param("damping", "must be in (0, 1]").to_string();
        assert!(msg.contains("damping"), "got: {msg}");
        assert!(msg.contains("(0, 1]"), "got: {msg}");
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let msg = EngineError::ParamTypeMismatch {
            name: "well_count".into(),
            expected: "integer".into(),
            got: "string".into(),
        }
        .to_string();
        assert!(msg.contains("well_count"));
        assert!(msg.contains("integer"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn unknown_engine_includes_name() {
        let msg = EngineError::UnknownEngine("comet".into()).to_string();
        assert!(msg.contains("comet"), "got: {msg}");
    }

    #[test]
    fn scheduler_and_io_carry_their_message() {
        assert!(EngineError::Scheduler("raf denied".into())
            .to_string()
            .contains("raf denied"));
        assert!(EngineError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
