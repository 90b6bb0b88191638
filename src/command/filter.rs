//! Allow-list check for generated commands.
//!
//! This is a literal prefix match on the trimmed text. It does not parse the
//! command, so chained commands (`ls; rm -rf /`) and longer names sharing a
//! prefix (`lsblk`, `rmdir`) pass. Treat it as a heuristic, not a sandbox.

/// Command names a generated command may start with.
pub const ALLOWED_COMMANDS: &[&str] = &["mv", "cp", "rm", "ls", "find", "git", "curl"];

/// Whether the generated text starts with an allowed command name.
pub fn is_allowed(command: &str) -> bool {
    let command = command.trim();
    ALLOWED_COMMANDS
        .iter()
        .any(|allowed| command.starts_with(allowed))
}
