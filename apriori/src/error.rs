use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed transaction database at {location}: {message}")]
    Format { location: String, message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("invalid argument {name}: {message}")]
    Validation { name: String, message: String },

    #[error("internal consistency violated: {message}")]
    Consistency { message: String },
}

impl Error {
    pub fn format(location: impl Into<String>, message: impl Into<String>) -> Error {
        Error::Format {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub fn validation(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error::Validation {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn consistency(message: impl Into<String>) -> Error {
        Error::Consistency {
            message: message.into(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
