pub mod component;
pub mod map;
pub mod node;
pub mod profile;
pub mod property;
pub mod ranked_index;
pub mod signature;
pub mod string_entity;
pub mod value;

pub use component::Component;
pub use map::Map;
pub use node::{Node, NumericChildRange};
pub use profile::Profile;
pub use property::{Property, ValueType};
pub use ranked_index::RankedSignatureIndex;
pub use signature::Signature;
pub use string_entity::StringRecord;
pub use value::Value;
