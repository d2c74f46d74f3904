//! Generative-language model port and the translation prompt sent through it.

pub mod client;
pub mod prompt;
