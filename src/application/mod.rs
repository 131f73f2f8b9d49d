pub mod submit_company;
pub mod submit_review;
