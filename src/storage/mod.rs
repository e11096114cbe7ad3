pub mod fixedlist;
pub mod varlist;

pub use fixedlist::{FixedRecord, FixedRecordList};
pub use varlist::{VariableRecord, VariableRecordList};
