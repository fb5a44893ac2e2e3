// Language-model advisory client

pub mod client;
pub mod types;

pub use client::{AdvisoryClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use types::{GenerateContentRequest, GenerateContentResponse};
