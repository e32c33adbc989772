//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod answer_model;
pub mod conversation_logger;
pub mod knowledge_source;
pub mod language_detector;
pub mod progress;
pub mod translation_service;
