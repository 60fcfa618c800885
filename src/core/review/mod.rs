pub mod models;
pub mod prompts;
pub mod review_service;

pub use models::{CasinoSheet, ReviewError, Section, SectionInputs};
pub use review_service::{GenerationBackend, ReviewService, TemplateError, TemplateStore};
