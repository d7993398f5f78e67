use std::fmt;

#[derive(Debug)]
pub enum AriaFixError {
    InvalidConfiguration(String),
    SkipperConfig(String),
    Io(std::io::Error),
}

impl fmt::Display for AriaFixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AriaFixError::InvalidConfiguration(message) => {
                write!(f, "invalid configuration: {}", message)
            }
            AriaFixError::SkipperConfig(message) => {
                write!(f, "skipper configuration error: {}", message)
            }
            AriaFixError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for AriaFixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AriaFixError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AriaFixError {
    fn from(value: std::io::Error) -> Self {
        AriaFixError::Io(value)
    }
}
