/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidOption { option: String, message: String },
    InvalidManifest(String),
    Render(String),
    Serialization(String),
}

impl Error {
    pub(crate) fn invalid_option(option: &str, message: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::InvalidOption { option, message } => {
                write!(f, "invalid option \"{}\": {}", option, message)
            }
            Error::InvalidManifest(msg) => write!(f, "invalid route manifest: {}", msg),
            Error::Render(msg) => write!(f, "failed to render documentation page: {}", msg),
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML error: {}", err))
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Render(err.to_string())
    }
}
