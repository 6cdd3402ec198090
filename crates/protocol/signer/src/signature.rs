//! Header signatures and signer recovery.

use crate::{Scalar, VerifyError};
use alloy_primitives::{Address, B256, Bytes, Signature, U256, eip191_hash_message, uint};

/// The order of the secp256k1 group.
pub const SECP256K1N: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Half the order of the secp256k1 group; the largest accepted `s`.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Length of a raw `r || s || v` signature.
pub const RAW_SIGNATURE_LENGTH: usize = 65;

const PARITY_BIT: U256 = U256::from_limbs([0, 0, 0, 1 << 63]);

/// A signature over a block header digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HeaderSignature {
    /// An EIP-2098 compact signature over the digest. The top bit of `vs` is the y-parity.
    Compact {
        /// The `r` scalar.
        r: B256,
        /// The `s` scalar with the y-parity packed into its top bit.
        vs: B256,
    },
    /// A 65-byte `r || s || v` personal-message signature over the digest.
    Raw(Bytes),
}

impl HeaderSignature {
    /// Packs a prehash signature into its compact form.
    ///
    /// The compact form only carries low-`s` signatures, so a high-`s` signature is replaced by
    /// its `(r, n - s, !v)` twin, which recovers to the same signer.
    pub fn compact_from(signature: &Signature) -> Self {
        let (mut vs, y_parity) = if signature.s() > SECP256K1N_HALF {
            (SECP256K1N - signature.s(), !signature.v())
        } else {
            (signature.s(), signature.v())
        };
        if y_parity {
            vs |= PARITY_BIT;
        }
        Self::Compact { r: B256::from(signature.r()), vs: B256::from(vs) }
    }

    /// Wraps a personal-message signature in its raw 65-byte form.
    pub fn raw_from(signature: &Signature) -> Self {
        Self::Raw(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    /// Splits the signature into range-checked `(r, s, y_parity)`.
    pub fn components(&self) -> Result<(U256, U256, bool), VerifyError> {
        let (r, s, y_parity) = match self {
            Self::Compact { r, vs } => {
                let vs = U256::from_be_bytes(vs.0);
                (U256::from_be_bytes(r.0), vs & !PARITY_BIT, vs & PARITY_BIT != U256::ZERO)
            }
            Self::Raw(bytes) => {
                let raw: &[u8; RAW_SIGNATURE_LENGTH] = bytes
                    .as_ref()
                    .try_into()
                    .map_err(|_| VerifyError::MalformedSignature(bytes.len()))?;
                let y_parity = match raw[64] {
                    0 | 27 => false,
                    1 | 28 => true,
                    _ => return Err(VerifyError::InvalidRecovery),
                };
                (U256::from_be_slice(&raw[..32]), U256::from_be_slice(&raw[32..64]), y_parity)
            }
        };

        if r.is_zero() || r >= SECP256K1N {
            return Err(VerifyError::OutOfRange(Scalar::R));
        }
        if s.is_zero() || s > SECP256K1N_HALF {
            return Err(VerifyError::OutOfRange(Scalar::S));
        }
        Ok((r, s, y_parity))
    }

    /// Returns the hash the signer actually signed for the given header digest.
    pub fn signing_hash(&self, digest: B256) -> B256 {
        match self {
            Self::Compact { .. } => digest,
            Self::Raw(_) => eip191_hash_message(digest),
        }
    }
}

/// Recovers the address that signed `digest`.
pub fn recover_signer(digest: B256, signature: &HeaderSignature) -> Result<Address, VerifyError> {
    let (r, s, y_parity) = signature.components()?;
    Signature::new(r, s, y_parity)
        .recover_address_from_prehash(&signature.signing_hash(digest))
        .map_err(|_| VerifyError::InvalidRecovery)
}
