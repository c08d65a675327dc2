pub mod contact_ops;
pub mod merge_ops;
