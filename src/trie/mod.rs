mod dataset;
mod header;
mod node;

pub use dataset::{TrieDataset, TrieMatch};
pub use header::TrieHeader;
pub use node::{OffsetWidth, TrieNode};
