//! Pipeline state machine vocabulary.

pub mod stage;
