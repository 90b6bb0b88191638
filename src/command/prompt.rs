//! System prompt template for command generation.

use super::{ShellType, TargetOs};

/// Build the system prompt for a single generation request.
pub fn build_system_prompt(shell_type: ShellType, os: Option<TargetOs>) -> String {
    let os_rule = match os {
        Some(os) => format!("5. Target OS: {}", os.as_str().to_uppercase()),
        None => "5. Default to POSIX-compliant syntax".to_string(),
    };

    [
        "You are a CLI command generation expert. Follow these rules strictly:".to_string(),
        "1. Return ONLY the executable command without any explanations".to_string(),
        "2. Use safest options by default".to_string(),
        "3. Handle special characters and spaces in paths automatically".to_string(),
        format!("4. Preferred shell type: {}", shell_type.as_str().to_uppercase()),
        os_rule,
        "6. Never use interactive prompts or confirmation dialogs".to_string(),
        "7. Prioritize cross-platform compatibility when possible".to_string(),
        "8. Do NOT wrap the command in markdown or code fences; return only the raw command line text."
            .to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_posix_without_os() {
        let prompt = build_system_prompt(ShellType::default(), None);
        assert!(prompt.contains("4. Preferred shell type: BASH"));
        assert!(prompt.contains("5. Default to POSIX-compliant syntax"));
        assert!(!prompt.contains("Target OS"));
    }

    #[test]
    fn targets_requested_os() {
        let prompt = build_system_prompt(ShellType::Powershell, Some(TargetOs::Windows));
        assert!(prompt.contains("4. Preferred shell type: POWERSHELL"));
        assert!(prompt.contains("5. Target OS: WINDOWS"));
        assert!(!prompt.contains("POSIX"));
    }

    #[test]
    fn rules_are_numbered_in_order() {
        let prompt = build_system_prompt(ShellType::Zsh, Some(TargetOs::Macos));
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("You are a CLI command generation expert"));
        for (i, line) in lines[1..].iter().enumerate() {
            assert!(line.starts_with(&format!("{}. ", i + 1)), "line {}: {}", i + 1, line);
        }
        assert_eq!(lines[5], "5. Target OS: MACOS");
        assert!(lines[8].contains("Do NOT wrap the command in markdown"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(
            build_system_prompt(ShellType::Bash, Some(TargetOs::Linux)),
            build_system_prompt(ShellType::Bash, Some(TargetOs::Linux))
        );
    }
}
