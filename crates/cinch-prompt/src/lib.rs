//! System prompt and compression prompt resolution for cinch agents.
//!
//! An agent needs two sets of instructions that do not come from the user:
//!
//! - the **system prompt**, resolved once at session start. It is either the
//!   built-in default or a Markdown file named by `CINCH_SYSTEM_MD`, can be
//!   written back to disk via `CINCH_WRITE_SYSTEM_MD`, and gets the caller's
//!   memory appended after a `---` rule;
//! - the **compression prompt**, used whenever the caller decides to squash
//!   a long history into a `<state_snapshot>`.
//!
//! # Getting started
//!
//! ```no_run
//! use cinch_prompt::{PromptResolver, compression_prompt};
//!
//! fn main() -> Result<(), cinch_prompt::PromptError> {
//!     let resolver = PromptResolver::from_env()?;
//!     let system = resolver.resolve(Some("The user prefers small commits."))?;
//!     println!("{system}");
//!
//!     // Later, when history must be compressed:
//!     let _summarizer_system = compression_prompt();
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Environment handling:** [`config::PromptConfig`] and
//!   [`config::OverrideSignal`]. The resolver never reads the environment
//!   itself, so tests can build configs directly.
//! - **Resolution steps:** [`resolver::resolve_base_text`],
//!   [`resolver::maybe_persist`], [`resolver::memory_suffix`], composed by
//!   [`PromptResolver`].
//! - **Prompt text:** [`prompt::default_system_prompt`] and
//!   [`prompt::compression_prompt`]. The text itself lives in `prompts/`.
//! - **Tool names** the default prompt refers to: [`tools::names`].

pub mod config;
pub mod error;
pub mod prompt;
pub mod resolver;
pub mod tools;

pub use config::{OverrideSignal, PromptConfig, SandboxMode};
pub use error::PromptError;
pub use prompt::{SNAPSHOT_SECTIONS, compression_prompt, default_system_prompt};
pub use resolver::{MEMORY_SEPARATOR, PromptResolver, PromptSource, ResolvedPrompt};
