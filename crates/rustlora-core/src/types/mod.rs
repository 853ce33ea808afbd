pub mod application_id;
pub mod identifier;
pub mod object;

pub use application_id::ApplicationId;
pub use identifier::{DevAddr, Eui64, ParseIdError};
pub use object::Object;

/// Serde adapter that renders raw payload bytes as standard base64.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

/// Deserializes a present `object` member, keeping a literal `null` as a
/// document instead of collapsing it to `None`. A missing member is handled
/// by `#[serde(default)]`.
pub(crate) mod present_object {
    use super::Object;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Object>, D::Error> {
        Object::deserialize(d).map(Some)
    }
}
