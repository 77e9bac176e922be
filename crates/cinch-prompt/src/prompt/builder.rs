//! Section-based prompt assembly.
//!
//! [`SystemPromptBuilder`] joins a preamble and a sequence of headed or raw
//! blocks with blank lines. The default system prompt is assembled with it
//! so that environment-dependent sections can be switched on and off without
//! string surgery on the template.

/// Builder for multi-section prompts.
///
/// Blocks are joined with double newlines. Empty blocks, and blocks whose
/// condition is false, are skipped.
///
/// # Example
///
/// ```
/// use cinch_prompt::prompt::SystemPromptBuilder;
///
/// let in_repo = false;
/// let prompt = SystemPromptBuilder::new("You are a coding agent.")
///     .heading_level(1)
///     .section("Sandbox", "You are running in a container.")
///     .section_if(in_repo, "Git Repository", || "Use git status first.".into())
///     .raw("# Final Reminder\n\nKeep going.")
///     .build();
///
/// assert!(prompt.contains("# Sandbox\n\nYou are running in a container."));
/// assert!(!prompt.contains("Git Repository"));
/// assert!(prompt.ends_with("Keep going."));
/// ```
pub struct SystemPromptBuilder {
    blocks: Vec<String>,
    heading_prefix: String,
}

impl SystemPromptBuilder {
    /// Start from a preamble, included as-is.
    ///
    /// Leading and trailing whitespace is trimmed so asset files can end in a
    /// newline without doubling the separator.
    pub fn new(preamble: impl AsRef<str>) -> Self {
        let mut blocks = Vec::new();
        let preamble = preamble.as_ref().trim();
        if !preamble.is_empty() {
            blocks.push(preamble.to_string());
        }
        Self {
            blocks,
            heading_prefix: "##".to_string(),
        }
    }

    /// Set the markdown heading level for subsequent sections. Default: 2.
    pub fn heading_level(mut self, level: u8) -> Self {
        self.heading_prefix = "#".repeat(level.max(1) as usize);
        self
    }

    /// Append a headed section. Skipped if `content` is blank.
    pub fn section(mut self, heading: &str, content: impl AsRef<str>) -> Self {
        let content = content.as_ref().trim();
        if !content.is_empty() {
            self.blocks
                .push(format!("{} {heading}\n\n{content}", self.heading_prefix));
        }
        self
    }

    /// Append a headed section when `condition` holds.
    ///
    /// `content_fn` is only called when `condition` is true.
    pub fn section_if(
        self,
        condition: bool,
        heading: &str,
        content_fn: impl FnOnce() -> String,
    ) -> Self {
        if condition {
            self.section(heading, content_fn())
        } else {
            self
        }
    }

    /// Append a block without a heading. Skipped if blank.
    pub fn raw(mut self, content: impl AsRef<str>) -> Self {
        let content = content.as_ref().trim();
        if !content.is_empty() {
            self.blocks.push(content.to_string());
        }
        self
    }

    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}
