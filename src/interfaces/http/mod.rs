//! HTTP REST API
//!
//! - `common`: response envelope and validated JSON extractor
//! - `modules`: freight, health and metrics handlers plus middleware
//! - `router`: route table with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
