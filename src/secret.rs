//! Reversible encoding for stored passwords
//!
//! Inventory files and cache artifacts never carry plaintext passwords;
//! they carry the base64 form produced here. This is an encoding, not
//! encryption.

use crate::error::{ArmadaError, ArmadaResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode a plaintext password for storage
pub fn encode_password(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}

/// Decode a stored password back to plaintext
pub fn decode_password(encoded: &str) -> ArmadaResult<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ArmadaError::PasswordDecode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ArmadaError::PasswordDecode(e.to_string()))
}
