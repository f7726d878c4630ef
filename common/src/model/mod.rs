pub mod attachment;
pub mod field;
pub mod row;
pub mod section;
pub mod submission;
