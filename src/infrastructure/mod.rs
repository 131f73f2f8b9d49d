pub mod database;
pub mod email;
pub mod moderation;
pub mod repositories;
