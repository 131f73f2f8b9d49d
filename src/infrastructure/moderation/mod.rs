pub mod company_screen;
pub mod content;
pub mod engine;
pub mod spam;
pub mod terms;
