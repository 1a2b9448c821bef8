use std::fmt;

#[derive(Debug)]
pub enum SMHIError {
    Transport(String),
    Status(String),
    Document(String),
    Task(String),
}

impl fmt::Display for SMHIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SMHIError::Transport(e) => write!(f, "SMHIError::Transport: {}", e),
            SMHIError::Status(e) => write!(f, "SMHIError::Status: {}", e),
            SMHIError::Document(e) => write!(f, "SMHIError::Document: {}", e),
            SMHIError::Task(e) => write!(f, "SMHIError::Task: {}", e),
        }
    }
}
impl From<reqwest::Error> for SMHIError {
    fn from(e: reqwest::Error) -> Self {
        SMHIError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for SMHIError {
    fn from(e: serde_json::Error) -> Self {
        SMHIError::Document(e.to_string())
    }
}
impl From<tokio::task::JoinError> for SMHIError {
    fn from(e: tokio::task::JoinError) -> Self {
        SMHIError::Task(e.to_string())
    }
}
