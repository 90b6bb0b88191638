//! Command generation domain: target platforms, prompt construction and the
//! allow-list check applied to generated commands.

mod filter;
mod prompt;

use serde::{Deserialize, Serialize};

pub use filter::{is_allowed, ALLOWED_COMMANDS};
pub use prompt::build_system_prompt;

/// Sampling temperature for every generation. Low to favor determinism.
pub const TEMPERATURE: f32 = 0.1;

/// Operating system the command should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Macos,
    Windows,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
        }
    }
}

/// Shell dialect the command should be written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    #[default]
    Bash,
    Powershell,
    Zsh,
}

impl ShellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Powershell => "powershell",
            Self::Zsh => "zsh",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
