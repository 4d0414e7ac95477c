//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, bad URL, or unparseable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// True when the API answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 404, .. })
    }
}
