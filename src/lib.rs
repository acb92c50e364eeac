pub mod composer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod gemini;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod routes;
