use thiserror::Error;

/// Failures raised inside a source adapter. These never cross the engine's
/// public boundary: the aggregator converts every one of them into a
/// fallback result set for the affected category.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request to `{url}` failed: {source}")]
    Transport { url: String, #[source] source: reqwest::Error },
    #[error("unexpected status {status} from `{url}`")]
    Status { url: String, status: u16 },
    #[error("malformed payload from `{url}`: {detail}")]
    Payload { url: String, detail: String },
    #[error("missing credentials for `{provider}`")]
    MissingCredentials { provider: &'static str },
    #[error("adapter failure: {0}")]
    Other(String),
}
