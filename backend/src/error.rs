use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("failed to reach routing service: {0}")]
    Http(reqwest::Error),
    #[error("routing service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed routing response: {0}")]
    Malformed(String),
}

// The request URL carries `api_key`; never let it reach logs or API errors.
impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err.without_url())
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(err: serde_json::Error) -> Self {
        RoutingError::Malformed(err.to_string())
    }
}
