//! The translated command line

use std::borrow::Cow;
use std::fmt;

use crate::config::Config;

/// Token separating `az ssh` arguments from arguments passed through to `ssh`
pub const SEPARATOR: &str = "--";

/// Fully translated invocation, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    /// Program to execute
    pub program: String,

    /// Subcommand placed before the tokens
    pub subcommand: String,

    /// Translated tokens following the subcommand
    pub tokens: Vec<String>,
}

impl InvocationPlan {
    /// Create a plan for the program and subcommand in `config`
    pub fn new(config: &Config, tokens: Vec<String>) -> Self {
        Self {
            program: config.program.clone(),
            subcommand: config.subcommand.clone(),
            tokens,
        }
    }

    /// Arguments passed to the program: subcommand followed by the tokens
    pub fn args(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subcommand.as_str()).chain(self.tokens.iter().map(String::as_str))
    }
}

/// Renders the plan as a copy-pasteable POSIX shell command
impl fmt::Display for InvocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_for_shell(&self.program))?;
        for arg in self.args() {
            write!(f, " {}", quote_for_shell(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for a POSIX shell if it needs quoting
///
/// Words made only of safe characters are returned unchanged. Anything else
/// is wrapped in single quotes, with embedded single quotes written as
/// `'"'"'` (end quote, literal quote in double quotes, reopen quote).
///
/// # Example
/// ```
/// use az_ssh::plan::quote_for_shell;
///
/// assert_eq!(quote_for_shell("host1"), "host1");
/// assert_eq!(quote_for_shell("echo 'hi'"), "'echo '\"'\"'hi'\"'\"''");
/// assert_eq!(quote_for_shell(""), "''");
/// ```
pub fn quote_for_shell(word: &str) -> Cow<'_, str> {
    let safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c);

    if !word.is_empty() && word.chars().all(safe) {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', "'\"'\"'")))
    }
}
