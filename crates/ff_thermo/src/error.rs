use std::fmt;
use std::path::PathBuf;

/// Status code of a failed parameter load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    IoFailure,
    FormatError,
    IncompleteTable,
}

#[derive(Debug)]
pub enum ThermoError {
    /// The parameter directory or one of its files does not exist.
    FileNotFound(PathBuf),
    /// Reading failed after the file was found.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A record could not be parsed (file, 1-based line, what went wrong).
    Format {
        file: String,
        line: usize,
        message: String,
    },
    /// The input ended before every required entry was populated.
    Incomplete {
        file: String,
        message: String,
    },
}

impl ThermoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThermoError::FileNotFound(_) => ErrorKind::FileNotFound,
            ThermoError::Io { .. } => ErrorKind::IoFailure,
            ThermoError::Format { .. } => ErrorKind::FormatError,
            ThermoError::Incomplete { .. } => ErrorKind::IncompleteTable,
        }
    }

    pub(crate) fn format(file: &str, line: usize, message: impl Into<String>) -> Self {
        ThermoError::Format {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn incomplete(file: &str, message: impl Into<String>) -> Self {
        ThermoError::Incomplete {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Attach a path to an I/O error, turning `NotFound` into `FileNotFound`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ThermoError::FileNotFound(path)
        } else {
            ThermoError::Io { path, source }
        }
    }
}

impl fmt::Display for ThermoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermoError::FileNotFound(path) => {
                write!(f, "Parameter file not found: {}", path.display())
            }
            ThermoError::Io { path, source } => {
                write!(f, "I/O error while reading {}: {}", path.display(), source)
            }
            ThermoError::Format { file, line, message } => {
                write!(f, "Format error in {} at line {}: {}", file, line, message)
            }
            ThermoError::Incomplete { file, message } => {
                write!(f, "Incomplete parameter table from {}: {}", file, message)
            }
        }
    }
}

impl std::error::Error for ThermoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThermoError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = ThermoError::from_io("params/stack.dh", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(format!("{}", err), "Parameter file not found: params/stack.dh");
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        use std::error::Error;
        let err = ThermoError::from_io("stack.ds", io::Error::from(io::ErrorKind::InvalidData));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_format_display() {
        let err = ThermoError::format("helix.dat", 3, "expected 2 values after 'init'");
        assert_eq!(err.kind(), ErrorKind::FormatError);
        assert_eq!(
            format!("{}", err),
            "Format error in helix.dat at line 3: expected 2 values after 'init'"
        );
    }
}
