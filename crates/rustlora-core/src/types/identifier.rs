use core::fmt;
use core::str::FromStr;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Parse failure for a hex-encoded identifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expected {expected} hex characters: {source}")]
pub struct ParseIdError {
    expected: usize,
    #[source]
    source: hex::FromHexError,
}

macro_rules! fixed_width_id {
    ($(#[$meta:meta])* $name:ident, $width:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u8; $width]);

        impl $name {
            /// Width of the identifier in bytes.
            pub const LEN: usize = $width;

            pub const fn new(bytes: [u8; $width]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }

            /// Builds the identifier from a slice that must be exactly
            /// [`Self::LEN`] bytes long.
            pub fn from_slice(bytes: &[u8]) -> Option<Self> {
                <[u8; $width]>::try_from(bytes).ok().map(Self)
            }
        }

        impl From<[u8; $width]> for $name {
            fn from(bytes: [u8; $width]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut out = [0u8; $width];
                hex::decode_to_slice(s, &mut out).map_err(|source| ParseIdError {
                    expected: $width * 2,
                    source,
                })?;
                Ok(Self(out))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

fixed_width_id!(
    /// 64-bit extended unique identifier of a device or gateway.
    ///
    /// Rendered externally as 16 lowercase hex characters.
    Eui64,
    8
);

fixed_width_id!(
    /// 32-bit device address assigned on join.
    ///
    /// Rendered externally as 8 lowercase hex characters.
    DevAddr,
    4
);
