pub mod pool;
pub mod reader;
pub mod source;

pub use pool::{PooledReader, ReaderPool};
pub use reader::Reader;
pub use source::Source;
