//! Configuration for system prompt resolution.
//!
//! The resolver never reads the process environment itself. Everything it
//! needs is carried by [`PromptConfig`], which is either built explicitly
//! (tests, embedding applications) or captured once from the environment via
//! [`PromptConfig::from_env`].
//!
//! # Environment variables
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `CINCH_SYSTEM_MD` | Load the system prompt from a file instead of the built-in default |
//! | `CINCH_WRITE_SYSTEM_MD` | Write the base system prompt to a file on every resolution |
//! | `SANDBOX` | Sandbox the agent runs in (`sandbox-exec` for macOS Seatbelt, anything else for a container) |
//!
//! Both `*_SYSTEM_MD` variables accept `1`/`true` (use `.cinch/system.md`
//! under the working directory), `0`/`false` (disabled), or a path.
//!
//! # Examples
//!
//! ```
//! use cinch_prompt::config::{OverrideSignal, PromptConfig};
//!
//! let config = PromptConfig::new("/work/project")
//!     .with_write_system_md(OverrideSignal::parse(Some("true")));
//!
//! assert!(config.system_md_path().is_none());
//! assert_eq!(
//!     config.write_system_md_path().unwrap(),
//!     std::path::Path::new("/work/project/.cinch/system.md"),
//! );
//! ```

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{PromptError, Result};

// ── Constants ──────────────────────────────────────────────────────

/// Project-level configuration directory, relative to the working directory.
pub const CONFIG_DIR: &str = ".cinch";

/// File name of the system prompt override inside [`CONFIG_DIR`].
pub const SYSTEM_MD_FILE: &str = "system.md";

pub const SYSTEM_MD_ENV: &str = "CINCH_SYSTEM_MD";
pub const WRITE_SYSTEM_MD_ENV: &str = "CINCH_WRITE_SYSTEM_MD";
pub const SANDBOX_ENV: &str = "SANDBOX";

/// `SANDBOX` value that identifies the macOS Seatbelt sandbox.
const SEATBELT_SANDBOX: &str = "sandbox-exec";

// ── Override signal ────────────────────────────────────────────────

/// Parsed form of a `*_SYSTEM_MD` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverrideSignal {
    /// Unset, blank, `0` or `false`.
    #[default]
    Disabled,
    /// `1` or `true`: use the default path, `<cwd>/.cinch/system.md`.
    Default,
    /// Any other value, kept with its original case.
    Path(String),
}

impl OverrideSignal {
    /// Parse a raw setting value.
    ///
    /// Sentinels are matched case-insensitively after trimming. A path value
    /// is trimmed but otherwise kept as given; only the decision lowercases.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Disabled;
        };
        let value = raw.trim();
        match value.to_lowercase().as_str() {
            "" | "0" | "false" => Self::Disabled,
            "1" | "true" => Self::Default,
            _ => Self::Path(value.to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Absolute path this signal points at, or `None` when disabled.
    ///
    /// Custom paths are resolved against `cwd`, not against any project root.
    pub fn target_path(&self, cwd: &Path) -> Option<PathBuf> {
        match self {
            Self::Disabled => None,
            Self::Default => Some(default_system_md_path(cwd)),
            Self::Path(raw) => Some(absolutize(cwd, Path::new(raw))),
        }
    }
}

/// `<cwd>/.cinch/system.md`.
pub fn default_system_md_path(cwd: &Path) -> PathBuf {
    absolutize(cwd, &Path::new(CONFIG_DIR).join(SYSTEM_MD_FILE))
}

// ── Sandbox ────────────────────────────────────────────────────────

/// The sandbox the agent process runs in, as reported by `SANDBOX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SandboxMode {
    #[default]
    None,
    MacosSeatbelt,
    Container,
}

impl SandboxMode {
    pub fn from_env_value(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::None,
            Some(SEATBELT_SANDBOX) => Self::MacosSeatbelt,
            Some(_) => Self::Container,
        }
    }
}

// ── Prompt config ──────────────────────────────────────────────────

/// Everything the resolver needs to decide where the system prompt comes
/// from and what the default prompt says about the environment.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Read override (`CINCH_SYSTEM_MD`). Default: disabled.
    pub system_md: OverrideSignal,
    /// Write-back target (`CINCH_WRITE_SYSTEM_MD`). Default: disabled.
    pub write_system_md: OverrideSignal,
    /// Directory that relative override paths and the default path are
    /// resolved against. A relative value is itself taken relative to the
    /// process working directory. Default: `"."`.
    pub cwd: PathBuf,
    /// Sandbox reported to the model. Default: [`SandboxMode::None`].
    pub sandbox: SandboxMode,
    /// Whether `cwd` is inside a git repository. Default: `false`.
    pub git_repository: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_md: OverrideSignal::Disabled,
            write_system_md: OverrideSignal::Disabled,
            cwd: PathBuf::from("."),
            sandbox: SandboxMode::None,
            git_repository: false,
        }
    }
}

impl PromptConfig {
    /// Create a config rooted at `cwd` with both overrides disabled.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Capture configuration from the process environment and working
    /// directory, and detect whether that directory is in a git repository.
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().map_err(PromptError::CurrentDir)?;
        let git_repository = is_git_repository(&cwd);
        Ok(Self::from_lookup(cwd, |key| env::var(key).ok()).with_git_repository(git_repository))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Only reads variables; `git_repository` is left `false`. Set it with
    /// [`with_git_repository`](Self::with_git_repository).
    pub fn from_lookup(cwd: impl Into<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            system_md: OverrideSignal::parse(lookup(SYSTEM_MD_ENV).as_deref()),
            write_system_md: OverrideSignal::parse(lookup(WRITE_SYSTEM_MD_ENV).as_deref()),
            sandbox: SandboxMode::from_env_value(lookup(SANDBOX_ENV).as_deref()),
            git_repository: false,
            cwd: cwd.into(),
        }
    }

    pub fn with_system_md(mut self, signal: OverrideSignal) -> Self {
        self.system_md = signal;
        self
    }

    pub fn with_write_system_md(mut self, signal: OverrideSignal) -> Self {
        self.write_system_md = signal;
        self
    }

    pub fn with_sandbox(mut self, sandbox: SandboxMode) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_git_repository(mut self, git_repository: bool) -> Self {
        self.git_repository = git_repository;
        self
    }

    /// Path the system prompt is loaded from, if the read override is on.
    pub fn system_md_path(&self) -> Option<PathBuf> {
        self.system_md.target_path(&self.cwd)
    }

    /// Path the base prompt is written to, if write-back is on.
    pub fn write_system_md_path(&self) -> Option<PathBuf> {
        self.write_system_md.target_path(&self.cwd)
    }
}

// ── Private helpers ────────────────────────────────────────────────

/// True if `dir` or any of its ancestors contains a `.git` entry.
fn is_git_repository(dir: &Path) -> bool {
    dir.ancestors().any(|d| d.join(".git").exists())
}

/// Join `path` onto `base` (unless already absolute), anchor a relative
/// result at the process working directory, and normalize it. Symlinks are
/// not resolved and the path need not exist.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let mut joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    if joined.is_relative()
        && let Ok(process_cwd) = env::current_dir()
    {
        joined = process_cwd.join(joined);
    }
    normalize(&joined)
}

/// Drop `.` components and fold `..` into the preceding directory.
///
/// `..` directly under the root stays at the root. A leading `..` in a
/// relative path has nothing to fold into and is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
