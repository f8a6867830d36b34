use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! fixed_hash {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Byte-wise equality and ordering; rendered as lowercase hex. The
        /// value is opaque: it is produced by hashing code elsewhere and only
        /// stored, compared, and serialized here.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            bytes: [u8; $len],
        }

        impl $name {
            /// Width of this identifier in bytes.
            pub const LEN: usize = $len;

            /// Create from raw bytes.
            pub fn from_raw(bytes: [u8; $len]) -> Self {
                Self { bytes }
            }

            /// The all-zero identifier.
            pub fn zero() -> Self {
                Self { bytes: [0u8; $len] }
            }

            /// A random identifier for tests and demos.
            pub fn random() -> Self {
                let mut bytes = [0u8; $len];
                rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
                Self { bytes }
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.bytes
            }

            /// Full hex-encoded string.
            pub fn to_hex(&self) -> String {
                hex::encode(self.bytes)
            }

            /// Parse from a hex string, with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self, TypeError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let decoded = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                Self::from_slice(&decoded)
            }

            /// Create from a byte slice of exactly [`Self::LEN`] bytes.
            pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
                if slice.len() != $len {
                    return Err(TypeError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    });
                }
                let mut bytes = [0u8; $len];
                bytes.copy_from_slice(slice);
                Ok(Self { bytes })
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.bytes.iter().all(|b| *b == 0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), hex::encode(&self.bytes[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self { bytes }
            }
        }
    };
}

fixed_hash!(UInt160, 20, "20-byte identifier: a script hash, i.e. an address.");
fixed_hash!(UInt256, 32, "32-byte identifier: a transaction or block hash.");
