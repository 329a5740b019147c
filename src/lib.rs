//! MagiskHluda - florida-server module builder
//!
//! Library crate for picking an upstream florida-server release, downloading
//! its Android server binaries and rendering the module's metadata files.

pub mod arch;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod http;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod selector;

pub use error::{Error, Result};
