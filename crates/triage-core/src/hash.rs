//! Stable plan fingerprints.
//!
//! Two pipelines built from the same stage signatures, config, and strategy
//! produce the same fingerprint across processes; serialization goes through
//! canonical JSON so field order cannot drift.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 32-byte blake3 digest of a serialized plan shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Fingerprint any serializable plan shape.
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256> {
    let bytes = serde_json::to_vec(v).map_err(|e| Error::Hash(e.to_string()))?;
    Ok(Hash256(*blake3::hash(&bytes).as_bytes()))
}
