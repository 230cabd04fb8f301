//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the console layer decoupled from storage details.

pub mod entity_service;
pub mod reports;
