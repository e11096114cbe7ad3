//! Device and browser detection: matches HTTP User-Agent strings against a
//! precompiled binary signature database.
//!
//! [`Provider`] is the usual entry point — open a data file, then match
//! User-Agents against it. [`Dataset`] and [`SignatureMatcher`] are the
//! pieces underneath for callers who want to manage reloads themselves.
//! The byte-indexed [`trie`] module is an alternative, smaller dataset
//! format with a simpler matching pipeline.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod header;
pub mod io;
pub mod matcher;
pub mod provider;
pub mod stats;
pub mod storage;
pub mod trie;
pub mod watcher;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, ErrorKind, Result};
pub use io::Source;
pub use matcher::{MatchResult, SignatureMatcher, Strategy};
pub use provider::Provider;
