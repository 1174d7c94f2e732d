use qpd_core::errors::QpdError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, QpdError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Renders a float with twelve significant digits so that hashes ignore
/// last-bit noise while keeping the magnitude of SI-scale values.
pub fn canonical_float(value: f64) -> String {
    format!("{value:.11e}")
}
