pub mod schema;
pub mod contact_repo;
pub mod phone_repo;
pub mod email_repo;
