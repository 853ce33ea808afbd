use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("value out of range")]
    ValueOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid tag")]
    InvalidTag,
    #[error("invalid length")]
    InvalidLength,
    #[error("invalid value")]
    InvalidValue,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("duplicate field with tag {0}")]
    DuplicateField(u8),
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u8),
}

/// Failure of a durable envelope decode.
///
/// Both variants are terminal for the message at hand: the envelope was
/// written by an incompatible producer or was damaged in storage, and retrying
/// the same bytes cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unregistered notification kind {0:?}")]
    UnregisteredKind(String),
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] DecodeError),
}

/// Failure at the external JSON boundary.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("field `{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
