//! LoRaWAN application notifications and their two encodings.
//!
//! `rustlora-core` defines the records a network server hands to application
//! integrations (uplinks, joins, acknowledgements, errors, device status) and
//! the downlink requests it receives back. Every queueable record has:
//!
//! - a **durable** encoding: a versioned, kind-tagged binary envelope used for
//!   queuing and replay ([`Notification::encode_durable`] /
//!   [`Notification::decode_durable`]);
//! - an **external** encoding: the JSON document published to integrations
//!   ([`encode_external`] / [`decode_external`]).
//!
//! Application-defined decoded objects are carried as opaque JSON text
//! ([`types::Object`]) through both.

/// Durable envelope and the closed set of notification kinds.
pub mod envelope;
/// Binary encoding primitives, tag system, and reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// External JSON encoding.
pub mod json;
/// Notification and payload records.
pub mod notifications;
/// Identifier and opaque document types shared by the records.
pub mod types;

pub use envelope::{decode_durable, encode_durable, Notification, NotificationKind};
pub use error::{CodecError, DecodeError, EncodeError, JsonError};
pub use json::{decode_external, encode_external, encode_external_pretty, ExternalJson};
