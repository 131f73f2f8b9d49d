pub mod company;
pub mod moderation;
pub mod review;
pub mod shared;
