//! Tool identifiers referenced by the prompts.
//!
//! This crate does not define or execute tools. It only interpolates their
//! names into the default system prompt; see [`names`].

pub mod names;

pub use names::PROMPT_TOOLS;
