#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

mod errors;
pub use errors::{Scalar, VerifyError};

mod signature;
pub use signature::{
    HeaderSignature, RAW_SIGNATURE_LENGTH, SECP256K1N, SECP256K1N_HALF, recover_signer,
};
