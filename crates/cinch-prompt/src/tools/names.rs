//! Canonical tool name constants.
//!
//! The default system prompt refers to the agent's tools by name. These are
//! the names the tool-execution side must register for those references to
//! line up. When a tool is renamed, only this file needs to change.

pub const READ_FILE: &str = "read_file";
pub const EDIT_FILE: &str = "edit_file";
pub const WRITE_FILE: &str = "write_file";
pub const LIST_DIR: &str = "list_dir";
pub const FIND_FILES: &str = "find_files";
pub const GREP: &str = "grep";
pub const SHELL: &str = "shell";
pub const SAVE_MEMORY: &str = "save_memory";

/// Placeholder key and tool name for every tool the default prompt mentions.
///
/// Template placeholders are written `{{key}}`; the key is the same string as
/// the default tool name so an unrendered template still reads sensibly.
pub const PROMPT_TOOLS: &[(&str, &str)] = &[
    ("read_file", READ_FILE),
    ("edit_file", EDIT_FILE),
    ("write_file", WRITE_FILE),
    ("list_dir", LIST_DIR),
    ("find_files", FIND_FILES),
    ("grep", GREP),
    ("shell", SHELL),
    ("save_memory", SAVE_MEMORY),
];
