pub mod record;
pub mod resume;
pub mod user;
