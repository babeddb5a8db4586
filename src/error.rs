use std::fmt::{
    Display,
    Result,
    Formatter
};

/// Simple, generic Error that is composed of a String
#[derive(Clone, PartialEq, Debug)]
pub struct BenchError {
    details: String,
}

impl BenchError {
    /// Creates a new Error
    pub fn new(msg: &str) -> BenchError {
        BenchError { details: msg.to_string() }
    }
}

impl Display for BenchError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "Error: {}", self.details)
    }
}

impl std::error::Error for BenchError {}

impl From<std::io::Error> for BenchError {
    fn from(error: std::io::Error) -> Self {
        BenchError::new(&format!("i/o error: {}", error))
    }
}

impl From<csv::Error> for BenchError {
    fn from(error: csv::Error) -> Self {
        BenchError::new(&format!("csv error: {}", error))
    }
}

impl From<serde_cbor::Error> for BenchError {
    fn from(error: serde_cbor::Error) -> Self {
        BenchError::new(&format!("serialization error: {}", error))
    }
}

impl From<aes_gcm::Error> for BenchError {
    fn from(_error: aes_gcm::Error) -> Self {
        // Aead's error is intentionally opaque, there is no more information in here
        BenchError::new("aead failure")
    }
}

impl From<String> for BenchError {
    fn from(error: String) -> Self {
        BenchError::new(error.as_str())
    }
}
