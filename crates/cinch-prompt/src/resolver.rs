//! System prompt resolution.
//!
//! Resolution runs in three steps, each usable on its own:
//!
//! 1. [`resolve_base_text`] picks the base prompt: the override file when
//!    `CINCH_SYSTEM_MD` is on, otherwise the rendered default. An enabled
//!    override whose file is missing is an error, never a silent fallback.
//! 2. [`maybe_persist`] writes the base prompt to its target when
//!    `CINCH_WRITE_SYSTEM_MD` is on. This is how the default prompt gets
//!    captured for editing.
//! 3. [`memory_suffix`] appends caller-supplied memory after a `---` rule.
//!
//! [`PromptResolver`] composes the three.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::prompt::default_system_prompt;

/// Separator placed between the base prompt and user memory.
pub const MEMORY_SEPARATOR: &str = "\n\n---\n\n";

/// Where the base prompt text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum PromptSource {
    /// The built-in default prompt.
    Default,
    /// An override file, by absolute path.
    File(PathBuf),
}

/// Base prompt text before the memory suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePrompt {
    pub text: String,
    pub source: PromptSource,
}

/// A fully resolved system prompt with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPrompt {
    /// Base text plus memory suffix. This is what goes to the model.
    pub text: String,
    pub source: PromptSource,
    /// Write-back target, if the base text was persisted.
    pub persisted_to: Option<PathBuf>,
}

/// Determine the base prompt text for `config`.
///
/// Override file contents are returned verbatim. The default prompt is
/// returned trimmed. Fails with [`PromptError::MissingOverrideFile`] if the
/// override is on and its path does not exist, and with
/// [`PromptError::Read`] if existence cannot be checked or the read fails.
pub fn resolve_base_text(config: &PromptConfig) -> Result<BasePrompt> {
    let Some(path) = config.system_md_path() else {
        return Ok(BasePrompt {
            text: default_system_prompt(config),
            source: PromptSource::Default,
        });
    };

    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(PromptError::MissingOverrideFile { path }),
        Err(source) => return Err(PromptError::Read { path, source }),
    }

    debug!(path = %path.display(), "loading system prompt override");
    let text = fs::read_to_string(&path).map_err(|source| PromptError::Read {
        path: path.clone(),
        source,
    })?;

    Ok(BasePrompt {
        text,
        source: PromptSource::File(path),
    })
}

/// Write `base_text` to the write-back target if one is configured.
///
/// Creates missing parent directories and overwrites any existing file.
/// Returns the path written, or `None` when write-back is off.
pub fn maybe_persist(config: &PromptConfig, base_text: &str) -> Result<Option<PathBuf>> {
    let Some(path) = config.write_system_md_path() else {
        return Ok(None);
    };

    let write_err = |source| PromptError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&path, base_text).map_err(write_err)?;

    info!(path = %path.display(), bytes = base_text.len(), "wrote system prompt");
    Ok(Some(path))
}

/// `MEMORY_SEPARATOR` followed by the trimmed memory, or an empty string
/// when there is no non-blank memory.
pub fn memory_suffix(memory: Option<&str>) -> String {
    match memory.map(str::trim) {
        Some(memory) if !memory.is_empty() => format!("{MEMORY_SEPARATOR}{memory}"),
        _ => String::new(),
    }
}

/// Resolves the session system prompt from a [`PromptConfig`].
///
/// Holds no state between calls: every [`resolve`](Self::resolve) re-reads
/// the override file and re-writes the write-back target.
///
/// # Example
///
/// ```
/// use cinch_prompt::{PromptConfig, PromptResolver};
///
/// let resolver = PromptResolver::new(PromptConfig::new("/work/project"));
/// let prompt = resolver.resolve(Some("  Prefers tabs.  ")).unwrap();
/// assert!(prompt.ends_with("\n\n---\n\nPrefers tabs."));
/// ```
#[derive(Debug, Clone)]
pub struct PromptResolver {
    config: PromptConfig,
}

impl PromptResolver {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Build a resolver from the process environment and working directory.
    pub fn from_env() -> Result<Self> {
        PromptConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Resolve the system prompt text, appending `memory` if non-blank.
    pub fn resolve(&self, memory: Option<&str>) -> Result<String> {
        self.resolve_detailed(memory).map(|resolved| resolved.text)
    }

    /// Like [`resolve`](Self::resolve), but also reports where the base text
    /// came from and where it was persisted.
    pub fn resolve_detailed(&self, memory: Option<&str>) -> Result<ResolvedPrompt> {
        let BasePrompt { text, source } = resolve_base_text(&self.config)?;
        let persisted_to = maybe_persist(&self.config, &text)?;

        let mut text = text;
        text.push_str(&memory_suffix(memory));

        debug!(?source, chars = text.len(), "resolved system prompt");
        Ok(ResolvedPrompt {
            text,
            source,
            persisted_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverrideSignal;
    use std::path::Path;

    fn config_in(dir: &Path) -> PromptConfig {
        PromptConfig::new(dir)
    }

    #[test]
    fn memory_suffix_trims_memory() {
        assert_eq!(
            memory_suffix(Some("\n  remember this \n")),
            "\n\n---\n\nremember this"
        );
    }

    #[test]
    fn memory_suffix_empty_for_blank_or_missing() {
        assert_eq!(memory_suffix(None), "");
        assert_eq!(memory_suffix(Some("")), "");
        assert_eq!(memory_suffix(Some(" \n\t ")), "");
    }

    #[test]
    fn disabled_override_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let base = resolve_base_text(&config).unwrap();
        assert_eq!(base.source, PromptSource::Default);
        assert_eq!(base.text, default_system_prompt(&config));
    }

    #[test]
    fn default_override_path_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path()).with_system_md(OverrideSignal::Default);

        let err = resolve_base_text(&config).unwrap_err();
        match err {
            PromptError::MissingOverrideFile { path } => {
                assert_eq!(path, dir.path().join(".cinch/system.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn override_file_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let contents = "  Custom prompt.\n\nWith trailing whitespace.  \n\n";
        fs::write(dir.path().join("Custom.md"), contents).unwrap();

        let config =
            config_in(dir.path()).with_system_md(OverrideSignal::Path("Custom.md".into()));
        let base = resolve_base_text(&config).unwrap();
        assert_eq!(base.text, contents);
        assert_eq!(base.source, PromptSource::File(dir.path().join("Custom.md")));
    }

    #[test]
    fn override_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("prompts")).unwrap();

        let config = config_in(dir.path()).with_system_md(OverrideSignal::Path("prompts".into()));
        let err = resolve_base_text(&config).unwrap_err();
        assert!(matches!(err, PromptError::Read { .. }), "{err}");
    }

    #[test]
    fn override_under_regular_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocker"), "not a directory").unwrap();

        let config = config_in(dir.path())
            .with_system_md(OverrideSignal::Path("blocker/system.md".into()));
        match resolve_base_text(&config).unwrap_err() {
            PromptError::Read { path, .. } => {
                assert_eq!(path, dir.path().join("blocker/system.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn persist_under_regular_file_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocker"), "not a directory").unwrap();

        let config = config_in(dir.path())
            .with_write_system_md(OverrideSignal::Path("blocker/out.md".into()));
        match maybe_persist(&config, "text").unwrap_err() {
            PromptError::Write { path, .. } => {
                assert_eq!(path, dir.path().join("blocker/out.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn persist_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = maybe_persist(&config_in(dir.path()), "text").unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join(".cinch").exists());
    }

    #[test]
    fn persist_default_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path()).with_write_system_md(OverrideSignal::Default);

        let written = maybe_persist(&config, "base text").unwrap().unwrap();
        assert_eq!(written, dir.path().join(".cinch/system.md"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "base text");
    }

    #[test]
    fn persist_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        fs::write(&target, "old contents that are longer").unwrap();

        let config = config_in(dir.path()).with_write_system_md(OverrideSignal::Path("out.md".into()));
        maybe_persist(&config, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn resolve_appends_memory_after_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path()).with_write_system_md(OverrideSignal::Default);
        let resolver = PromptResolver::new(config.clone());

        let resolved = resolver.resolve_detailed(Some("User likes Rust.")).unwrap();
        let default = default_system_prompt(&config);

        assert_eq!(resolved.text, format!("{default}\n\n---\n\nUser likes Rust."));
        assert_eq!(resolved.source, PromptSource::Default);
        let persisted = resolved.persisted_to.unwrap();
        assert_eq!(fs::read_to_string(persisted).unwrap(), default);
    }

    #[test]
    fn missing_override_fails_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path())
            .with_system_md(OverrideSignal::Path("absent.md".into()))
            .with_write_system_md(OverrideSignal::Path("copy.md".into()));

        let err = PromptResolver::new(config).resolve(Some("memory")).unwrap_err();
        assert!(matches!(err, PromptError::MissingOverrideFile { .. }));
        assert!(!dir.path().join("copy.md").exists());
    }

    #[test]
    fn resolved_prompt_serializes_source() {
        let resolved = ResolvedPrompt {
            text: "t".into(),
            source: PromptSource::File(PathBuf::from("/work/system.md")),
            persisted_to: None,
        };
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["source"]["kind"], "file");
        assert_eq!(json["source"]["path"], "/work/system.md");
        assert!(json["persisted_to"].is_null());

        let json = serde_json::to_value(PromptSource::Default).unwrap();
        assert_eq!(json["kind"], "default");
    }
}
