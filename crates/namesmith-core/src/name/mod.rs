//! Generated name records and the rules for merging them into the result list.

mod model;
mod result_set;

pub use model::{Gender, NameRecord};
pub use result_set::{MergeMode, ResultSet, merge_results};
