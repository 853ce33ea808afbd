/// Encode/decode functions for the primitive field types.
pub mod primitives;
/// Zero-copy byte reader for decoding envelopes.
pub mod reader;
/// Tag headers (application, context, opening/closing).
pub mod tag;
/// Growable byte writer for encoding envelopes.
pub mod writer;
