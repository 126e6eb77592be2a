//! Accepted option grammar
//!
//! The short options mirror the OpenSSH 8.9p1 client. The long options are
//! extensions consumed by the wrapper itself and never reach `ssh`.

use std::fmt;

use crate::error::{AzSshError, Result};

/// Short flags that take no value
pub const NO_VALUE_FLAGS: &str = "46AaCfGgKkMNnqsTtVvXxYy";

/// Short flags that require exactly one value
pub const VALUE_FLAGS: &str = "BbcDEeFIiJLlmOopQRSWw";

/// Short flag whose value is an arbitrary `Key=Value` setting
pub const GENERIC_OPTION_FLAG: char = 'o';

/// Whether a short flag takes a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Flag,
    Value,
}

/// Look up a short flag in the OpenSSH grammar
pub fn short_arity(flag: char) -> Option<Arity> {
    if NO_VALUE_FLAGS.contains(flag) {
        Some(Arity::Flag)
    } else if VALUE_FLAGS.contains(flag) {
        Some(Arity::Value)
    } else {
        None
    }
}

/// Extension long options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LongOption {
    /// `--arc`: connect through Azure Arc
    Arc,
    /// `--subscription VALUE`: Azure subscription ID
    Subscription,
    /// `--resource-group VALUE`: Azure resource group name
    ResourceGroup,
    /// `--local-user VALUE`: username to connect as
    LocalUser,
}

impl LongOption {
    pub const ALL: [LongOption; 4] = [
        LongOption::Arc,
        LongOption::Subscription,
        LongOption::ResourceGroup,
        LongOption::LocalUser,
    ];

    /// Name without the leading dashes
    pub fn name(self) -> &'static str {
        match self {
            LongOption::Arc => "arc",
            LongOption::Subscription => "subscription",
            LongOption::ResourceGroup => "resource-group",
            LongOption::LocalUser => "local-user",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            LongOption::Arc => Arity::Flag,
            _ => Arity::Value,
        }
    }

    /// Resolve a long option name as typed after `--`.
    ///
    /// An exact name wins, otherwise a unique prefix selects the option.
    ///
    /// # Examples
    /// ```
    /// use az_ssh::args::LongOption;
    ///
    /// assert_eq!(LongOption::lookup("arc").unwrap(), LongOption::Arc);
    /// assert_eq!(LongOption::lookup("sub").unwrap(), LongOption::Subscription);
    /// assert!(LongOption::lookup("help").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Self> {
        if let Some(exact) = Self::ALL.into_iter().find(|o| o.name() == name) {
            return Ok(exact);
        }

        let mut candidates = Self::ALL.into_iter().filter(|o| o.name().starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Ok(only),
            (Some(_), Some(_)) => Err(AzSshError::AmbiguousOption(format!("--{name}"))),
            _ => Err(AzSshError::unknown_option(format!("--{name}"))),
        }
    }
}

impl fmt::Display for LongOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name())
    }
}

/// Name of a parsed option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    Short(char),
    Long(LongOption),
}

/// Renders the option the way it is spelled on an OpenSSH command line
impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionName::Short(flag) => write!(f, "-{flag}"),
            OptionName::Long(long) => write!(f, "{long}"),
        }
    }
}
