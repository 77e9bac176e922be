//! Prompt text: the default system prompt and the compression prompt.
//!
//! 1. **[`system`]** renders the built-in default system prompt from its
//!    assets, with sandbox and git sections chosen from the config.
//! 2. **[`compression`]** holds the fixed `<state_snapshot>` summarization
//!    instructions.
//! 3. **[`builder`]** provides [`SystemPromptBuilder`], used to join prompt
//!    blocks.

pub mod builder;
pub mod compression;
pub mod system;

pub use builder::SystemPromptBuilder;
pub use compression::{SNAPSHOT_SECTIONS, compression_prompt};
pub use system::default_system_prompt;
