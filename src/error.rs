use std::path::PathBuf;

/// Every failure the engine and the CLI can surface.
///
/// Each variant carries the process exit code it maps to, so `main` can stay a
/// one-line match.
#[derive(Debug, thiserror::Error)]
pub enum Res14cError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Calibration curve line {line}: {message}")]
    CurveParse { line: usize, message: String },

    #[error("Calibration curve contains no data rows.")]
    EmptyCurve,

    #[error("No calibration curve points between {from} and {to} cal BP.")]
    EmptySpan { from: i64, to: i64 },

    #[error("Calibrated distribution for 14C age {c14_age} BP has no finite probability mass.")]
    DegenerateDistribution { c14_age: i64 },

    #[error("Worker pool failure: {0}")]
    WorkerPool(String),

    #[error("Failed to write output: {0}")]
    Output(String),
}

impl Res14cError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) | Self::Io { .. } | Self::Output(_) => 2,
            Self::CurveParse { .. } | Self::EmptyCurve | Self::EmptySpan { .. } => 3,
            Self::DegenerateDistribution { .. } | Self::WorkerPool(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(Res14cError::InvalidInput("x".into()).exit_code(), 2);
        assert_eq!(
            Res14cError::CurveParse {
                line: 3,
                message: "bad".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(Res14cError::DegenerateDistribution { c14_age: 10 }.exit_code(), 4);
    }

    #[test]
    fn parse_error_message_names_line() {
        let err = Res14cError::CurveParse {
            line: 7,
            message: "expected 3 fields, found 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Calibration curve line 7: expected 3 fields, found 2"
        );
    }
}
