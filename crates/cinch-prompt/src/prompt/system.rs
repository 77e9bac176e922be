//! The built-in default system prompt.
//!
//! The prompt text lives in compiled-in Markdown assets under `prompts/`. At
//! render time the sandbox and git sections are chosen from [`PromptConfig`],
//! the blocks are joined with [`SystemPromptBuilder`], and every `{{tool}}`
//! placeholder is replaced with the canonical tool name from
//! [`tools::names`](crate::tools::names).

use crate::config::{PromptConfig, SandboxMode};
use crate::prompt::SystemPromptBuilder;
use crate::tools::PROMPT_TOOLS;

const CORE_TEMPLATE: &str = include_str!("../../prompts/system.md");
const SANDBOX_NONE: &str = include_str!("../../prompts/sandbox/none.md");
const SANDBOX_SEATBELT: &str = include_str!("../../prompts/sandbox/seatbelt.md");
const SANDBOX_CONTAINER: &str = include_str!("../../prompts/sandbox/container.md");
const GIT_SECTION: &str = include_str!("../../prompts/git.md");
const EXAMPLES: &str = include_str!("../../prompts/examples.md");

/// Render the default system prompt for `config`, trimmed.
///
/// Only `sandbox` and `git_repository` affect the output; the override
/// settings are the resolver's concern.
pub fn default_system_prompt(config: &PromptConfig) -> String {
    let (sandbox_heading, sandbox_body) = sandbox_section(config.sandbox);

    let prompt = SystemPromptBuilder::new(CORE_TEMPLATE)
        .heading_level(1)
        .section(sandbox_heading, sandbox_body)
        .section_if(config.git_repository, "Git Repository", || {
            GIT_SECTION.to_string()
        })
        .raw(EXAMPLES)
        .build();

    render_tool_names(&prompt).trim().to_string()
}

fn sandbox_section(sandbox: SandboxMode) -> (&'static str, &'static str) {
    match sandbox {
        SandboxMode::None => ("Outside of Sandbox", SANDBOX_NONE),
        SandboxMode::MacosSeatbelt => ("macOS Seatbelt", SANDBOX_SEATBELT),
        SandboxMode::Container => ("Sandbox", SANDBOX_CONTAINER),
    }
}

/// Substitute `{{name}}` placeholders with tool names.
fn render_tool_names(template: &str) -> String {
    PROMPT_TOOLS
        .iter()
        .fold(template.to_string(), |text, (key, name)| {
            text.replace(&format!("{{{{{key}}}}}"), name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::names;

    #[test]
    fn default_prompt_is_trimmed_and_non_empty() {
        let prompt = default_system_prompt(&PromptConfig::default());
        assert!(!prompt.is_empty());
        assert_eq!(prompt, prompt.trim());
        assert!(prompt.starts_with("You are an interactive command-line agent"));
    }

    #[test]
    fn all_placeholders_rendered() {
        for config in [
            PromptConfig::default(),
            PromptConfig::default()
                .with_git_repository(true)
                .with_sandbox(SandboxMode::Container),
        ] {
            let prompt = default_system_prompt(&config);
            assert!(!prompt.contains("{{"), "unrendered placeholder in prompt");
            assert!(!prompt.contains("}}"), "unrendered placeholder in prompt");
        }
    }

    #[test]
    fn tool_names_interpolated() {
        let prompt = default_system_prompt(&PromptConfig::default());
        for name in [
            names::READ_FILE,
            names::EDIT_FILE,
            names::WRITE_FILE,
            names::LIST_DIR,
            names::FIND_FILES,
            names::GREP,
            names::SHELL,
            names::SAVE_MEMORY,
        ] {
            assert!(prompt.contains(&format!("`{name}`")), "missing {name}");
        }
    }

    #[test]
    fn outside_sandbox_section_by_default() {
        let prompt = default_system_prompt(&PromptConfig::default());
        assert!(prompt.contains("# Outside of Sandbox"));
        assert!(!prompt.contains("# macOS Seatbelt"));
    }

    #[test]
    fn seatbelt_section() {
        let config = PromptConfig::default().with_sandbox(SandboxMode::MacosSeatbelt);
        let prompt = default_system_prompt(&config);
        assert!(prompt.contains("# macOS Seatbelt"));
        assert!(!prompt.contains("# Outside of Sandbox"));
    }

    #[test]
    fn container_section() {
        let config = PromptConfig::default().with_sandbox(SandboxMode::Container);
        let prompt = default_system_prompt(&config);
        assert!(prompt.contains("# Sandbox\n\nYou are running in a sandbox container"));
    }

    #[test]
    fn git_section_only_in_repository() {
        let outside = default_system_prompt(&PromptConfig::default());
        assert!(!outside.contains("# Git Repository"));

        let inside = default_system_prompt(&PromptConfig::default().with_git_repository(true));
        assert!(inside.contains("# Git Repository"));
        assert!(inside.contains("git diff HEAD"));
    }

    #[test]
    fn examples_close_the_prompt() {
        let prompt = default_system_prompt(&PromptConfig::default().with_git_repository(true));
        let git = prompt.find("# Git Repository").unwrap();
        let examples = prompt.find("# Examples").unwrap();
        assert!(git < examples);
        assert!(prompt.contains("# Final Reminder"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = PromptConfig::default().with_git_repository(true);
        assert_eq!(default_system_prompt(&config), default_system_prompt(&config));
    }
}
