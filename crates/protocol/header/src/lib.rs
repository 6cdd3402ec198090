#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod errors;
pub use errors::{DecodeError, HeaderField};

mod item;
pub use item::{MAX_DEPTH, RlpItem};

mod header;
pub use header::{BLOOM_WORDS, BlockHeader, LEGACY_ITEM_COUNT, LONDON_ITEM_COUNT};

mod digest;
pub use digest::digest_of;
