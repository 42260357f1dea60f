use thiserror::Error;

/// Errors from calls to generative AI backends.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI backend: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI backend response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI backend returned an error: {0}")]
    AiApi(String),
}

/// Errors raised inside a raw-content extraction backend.
///
/// These never escape the extractor boundary: the fallback controller
/// converts them into an unusable result and moves to the next backend.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Backend request failed: {0}")]
    Request(String),
    #[error("Failed to parse document content: {0}")]
    Parse(String),
    #[error("OCR engine failed: {0}")]
    Ocr(String),
    #[error("An internal error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        ExtractError::Request(err.to_string())
    }
}

/// Errors surfaced by the pipeline for a single document.
///
/// The only variant callers see in practice is `Io`: backend and parsing
/// failures are absorbed per the fallback policy and become empty content
/// or the raw-content item.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to read document '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("An unexpected internal error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}
