#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod backtrace;

mod error;
pub use error::{CliError, CliResult};

mod flags;
pub use flags::GlobalArgs;

mod styles;
pub use styles::cli_styles;

mod tracing;
pub use tracing::{init_tracing_subscriber, verbosity_level};
