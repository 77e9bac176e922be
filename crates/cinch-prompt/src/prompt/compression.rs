//! Instructions for compressing conversation history.
//!
//! When the caller decides the history is too long, it sends the whole
//! conversation to the model with [`compression_prompt`] as the system
//! message. The model answers with a `<state_snapshot>` document whose
//! fields are listed in [`SNAPSHOT_SECTIONS`]; that snapshot then replaces
//! the history. This crate does not parse the snapshot.

const COMPRESSION_TEMPLATE: &str = include_str!("../../prompts/compression.md");

/// Field tags of the `<state_snapshot>` document, in the order the template
/// presents them.
pub const SNAPSHOT_SECTIONS: [&str; 5] = [
    "overall_goal",
    "key_knowledge",
    "file_system_state",
    "recent_actions",
    "current_plan",
];

/// The history-compression system prompt. Identical on every call.
pub fn compression_prompt() -> &'static str {
    COMPRESSION_TEMPLATE.trim()
}
