//! Library half of the `larch` command-line tool.
//!
//! The binary is a thin clap front end over these modules:
//!
//! - [`config`]: YAML and environment configuration, turned into a
//!   [`LoweringPipeline`](larch_compile::LoweringPipeline)
//! - [`input`]: the JSON batch format read by `larch lower`
//! - [`commands`]: one module per subcommand

pub mod commands;
pub mod config;
pub mod input;

pub use config::{ConfigError, LarchConfig};
pub use input::{MatrixBatch, NamedMatrix};
