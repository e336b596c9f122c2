//! Input fingerprinting
//!
//! A run is fully determined by its input record and RNG seed. Hashing both
//! gives a stable identifier for "the same invocation", so a re-run can be
//! matched against an earlier table.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::engine::AllocationError;
use crate::models::InputRecord;

#[derive(Serialize)]
struct FingerprintPayload<'a> {
    input: &'a InputRecord,
    rng_seed: u64,
}

/// SHA-256 (lowercase hex) of the input record's JSON plus the seed
///
/// # Errors
/// Returns `AllocationError::Serialization` if the record cannot be
/// encoded as JSON.
pub fn compute_input_fingerprint(
    input: &InputRecord,
    rng_seed: u64,
) -> Result<String, AllocationError> {
    let payload = FingerprintPayload { input, rng_seed };
    let json = serde_json::to_string(&payload)
        .map_err(|e| AllocationError::Serialization(format!("Input serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}
