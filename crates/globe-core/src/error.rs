use thiserror::Error;

/// Errors raised while loading or decoding globe resources.
///
/// None of these are surfaced to the viewer; the web layer logs them and
/// keeps rendering with whatever data it already has.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("invalid JSON in {resource}: {source}")]
    Json {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("request for {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("request for {url} failed: {message}")]
    Fetch { url: String, message: String },
    #[error("model import failed: {0}")]
    Model(#[from] gltf::Error),
    #[error("model buffer {index} was not supplied")]
    MissingBuffer { index: usize },
    #[error("model buffer {index} holds {actual} bytes, expected {expected}")]
    BufferTooShort {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("model contains no triangle meshes")]
    EmptyModel,
    #[error("invalid coordinate {value:?} for `{key}`")]
    InvalidCoordinate { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, GlobeError>;
