use std::fmt;

/// Result type for vitals-probes operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ways an external query command can be unavailable.
///
/// None of these are fatal: the probe that hit one falls back to its
/// subsystem's default and keeps the message as an advisory error.
#[derive(Debug)]
pub enum Error {
    /// The program could not be started (missing binary, permissions)
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully
    ExitStatus { program: String, code: Option<i32> },

    /// The program succeeded but printed nothing
    EmptyOutput { program: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spawn { program, source } => write!(f, "failed to run {}: {}", program, source),
            Error::ExitStatus {
                program,
                code: Some(code),
            } => write!(f, "{} exited with status {}", program, code),
            Error::ExitStatus {
                program,
                code: None,
            } => write!(f, "{} was terminated by a signal", program),
            Error::EmptyOutput { program } => write!(f, "{} produced no output", program),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { source, .. } => Some(source),
            Error::ExitStatus { .. } | Error::EmptyOutput { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::ExitStatus {
            program: "/usr/bin/tmutil".to_string(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "/usr/bin/tmutil exited with status 1");

        let err = Error::EmptyOutput {
            program: "/usr/sbin/system_profiler".to_string(),
        };
        assert_eq!(err.to_string(), "/usr/sbin/system_profiler produced no output");
    }

    #[test]
    fn test_spawn_error_has_source() {
        let err = Error::Spawn {
            program: "/usr/sbin/scutil".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to run /usr/sbin/scutil"));
    }
}
