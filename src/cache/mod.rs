pub mod generational;

pub use generational::GenerationalCache;
