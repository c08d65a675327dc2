pub mod contact_queries;
pub mod export_queries;
