// crates/trustnet-core/src/crypto.rs
//
// Personal-message signatures: keccak256 over the prefixed message digest,
// secp256k1 public-key recovery, and address comparison.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};

use crate::error::TrustError;

/// Prefix of the personal-message signing scheme.
const MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// A secp256k1 keypair with its derived account address.
pub struct Keypair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let verifying_key = *signing_key.verifying_key();
        Keypair {
            signing_key,
            verifying_key,
        }
    }

    /// Load a keypair from a 32-byte secret key (hex, `0x` optional).
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, TrustError> {
        let bytes = decode_hex(secret_hex)?;
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|e| TrustError::Validation(format!("Invalid secret key: {}", e)))?;
        let verifying_key = *signing_key.verifying_key();
        Ok(Keypair {
            signing_key,
            verifying_key,
        })
    }

    /// Secret key as lowercase hex without prefix.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// `0x`-prefixed lowercase account address.
    pub fn address(&self) -> String {
        address_from_key(&self.verifying_key)
    }

    /// Sign a personal message and return the `0x`-prefixed 65-byte signature.
    pub fn sign(&self, message: &str) -> Result<String, TrustError> {
        sign_message(&self.signing_key, message)
    }
}

/// Compute keccak256 of the given bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest signed by personal-message wallets:
/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`.
pub fn message_hash(message: &str) -> [u8; 32] {
    let prefixed = format!("{}{}{}", MESSAGE_PREFIX, message.len(), message);
    keccak256(prefixed.as_bytes())
}

/// Address of a public key: last 20 bytes of keccak256 over the uncompressed point.
pub fn address_from_key(key: &VerifyingKey) -> String {
    let point = key.as_affine().to_encoded_point(false);
    // Skip the 0x04 SEC1 tag.
    let hash = keccak256(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Sign a personal message with the given key.
///
/// Returns `r || s || v` hex-encoded with `v` in {27, 28}.
pub fn sign_message(signing_key: &SigningKey, message: &str) -> Result<String, TrustError> {
    let digest = message_hash(message);
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(&digest)
        .map_err(|e| TrustError::Computation(format!("Signing failed: {}", e)))?;

    let mut bytes = signature.to_bytes().to_vec();
    bytes.push(27 + recovery_id.to_byte());
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Recover the signing address from a personal message and its signature.
pub fn recover_address(message: &str, signature_hex: &str) -> Result<String, TrustError> {
    let bytes = decode_hex(signature_hex)?;
    if bytes.len() != 65 {
        return Err(TrustError::Authentication(format!(
            "Signature must be exactly 65 bytes (got {})",
            bytes.len()
        )));
    }

    let signature = Signature::from_slice(&bytes[..64])
        .map_err(|e| TrustError::Authentication(format!("Malformed signature: {}", e)))?;

    let v = bytes[64];
    let v = if v >= 27 { v - 27 } else { v };
    let recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| TrustError::Authentication(format!("Invalid recovery id: {}", bytes[64])))?;

    let digest = message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|e| TrustError::Authentication(format!("Recovery failed: {}", e)))?;

    Ok(address_from_key(&key))
}

/// Verify that `signature_hex` over `message` was produced by `claimed_address`.
///
/// Comparison is case-insensitive. Any recovery failure returns `false`.
pub fn verify_signature(message: &str, signature_hex: &str, claimed_address: &str) -> bool {
    match recover_address(message, signature_hex) {
        Ok(recovered) => {
            let claimed = claimed_address.trim();
            let claimed = claimed
                .strip_prefix("0x")
                .or_else(|| claimed.strip_prefix("0X"))
                .unwrap_or(claimed);
            recovered[2..].eq_ignore_ascii_case(claimed)
        }
        Err(e) => {
            tracing::warn!("Signature verification failed: {}", e);
            false
        }
    }
}

/// Like [`verify_signature`], but returns `AuthenticationError` on mismatch.
pub fn require_signature(
    message: &str,
    signature_hex: &str,
    claimed_address: &str,
) -> Result<(), TrustError> {
    if verify_signature(message, signature_hex, claimed_address) {
        Ok(())
    } else {
        Err(TrustError::Authentication("Invalid signature".to_string()))
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>, TrustError> {
    let trimmed = value.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(stripped).map_err(|e| TrustError::Authentication(format!("Invalid hex: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_known_key_address() {
        let keypair = Keypair::from_secret_hex(TEST_SECRET).unwrap();
        assert_eq!(keypair.address(), "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
    }

    #[test]
    fn test_sign_verify_hello() {
        let keypair = Keypair::from_secret_hex(TEST_SECRET).unwrap();
        let signature = keypair.sign("hello").unwrap();
        assert!(verify_signature("hello", &signature, &keypair.address()));
    }

    #[test]
    fn test_address_comparison_ignores_case() {
        let keypair = Keypair::generate();
        let signature = keypair.sign("hello").unwrap();
        let upper = format!("0x{}", keypair.address()[2..].to_uppercase());
        assert!(verify_signature("hello", &signature, &upper));
        assert!(verify_signature("hello", &signature, &keypair.address()[2..]));
    }

    #[test]
    fn test_flipped_byte_fails() {
        let keypair = Keypair::from_secret_hex(TEST_SECRET).unwrap();
        let signature = keypair.sign("hello").unwrap();
        let mut bytes = hex::decode(&signature[2..]).unwrap();
        bytes[10] ^= 0x01;
        let tampered = format!("0x{}", hex::encode(bytes));
        assert!(!verify_signature("hello", &tampered, &keypair.address()));
    }

    #[test]
    fn test_mismatched_address_fails() {
        let keypair = Keypair::generate();
        let other = Keypair::generate();
        let signature = keypair.sign("hello").unwrap();
        assert!(!verify_signature("hello", &signature, &other.address()));
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = Keypair::generate();
        let signature = keypair.sign("hello").unwrap();
        assert!(!verify_signature("goodbye", &signature, &keypair.address()));
    }

    #[test]
    fn test_malformed_signatures_fail_without_panicking() {
        let address = Keypair::generate().address();
        assert!(!verify_signature("hello", "", &address));
        assert!(!verify_signature("hello", "0xzz", &address));
        assert!(!verify_signature("hello", &format!("0x{}", "ab".repeat(64)), &address));
        assert!(!verify_signature("hello", &format!("0x{}", "00".repeat(65)), &address));
    }

    #[test]
    fn test_raw_recovery_byte_accepted() {
        let keypair = Keypair::generate();
        let signature = keypair.sign("hello").unwrap();
        let mut bytes = hex::decode(&signature[2..]).unwrap();
        bytes[64] -= 27;
        let raw = hex::encode(bytes);
        assert!(verify_signature("hello", &raw, &keypair.address()));
    }

    #[test]
    fn test_require_signature_maps_to_authentication_error() {
        let keypair = Keypair::generate();
        let err = require_signature("hello", "0x00", &keypair.address()).unwrap_err();
        assert!(matches!(err, TrustError::Authentication(_)));
    }
}
