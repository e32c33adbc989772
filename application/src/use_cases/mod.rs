//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_question;
pub mod generate_answer;
pub mod qa_session;
pub mod retrieve_context;
pub mod translate_text;
