//! Translation of OpenSSH arguments into `az ssh` arguments
//!
//! Extension options are consumed here, `-o Control*` settings are dropped
//! and everything else is passed through to `ssh` after the separator.

use std::ffi::OsString;

use tracing::debug;

use crate::args::{parse, LongOption, OptionName, ParsedArgs, ParsedOption, GENERIC_OPTION_FLAG};
use crate::config::Config;
use crate::error::Result;
use crate::plan::{InvocationPlan, SEPARATOR};

/// Prefix of `-o` settings that make `az ssh` block for the
/// `ControlPersist` duration
const BLOCKED_SETTING_PREFIX: &str = "Control";

/// Azure Arc options consumed by the wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcOptions {
    /// `--arc` was given
    pub enabled: bool,

    pub subscription: Option<String>,
    pub resource_group: Option<String>,
    pub local_user: Option<String>,
}

impl ArcOptions {
    /// Whether any of the Arc-only value options was supplied
    fn has_values(&self) -> bool {
        self.subscription.is_some() || self.resource_group.is_some() || self.local_user.is_some()
    }

    /// Record one extension option. A repeated option overrides the
    /// earlier one; an empty value counts as not supplied.
    fn apply(&mut self, option: LongOption, value: String) {
        let value = Some(value).filter(|v| !v.is_empty());
        match option {
            LongOption::Arc => self.enabled = true,
            LongOption::Subscription => self.subscription = value,
            LongOption::ResourceGroup => self.resource_group = value,
            LongOption::LocalUser => self.local_user = value,
        }
    }
}

/// Split parsed options into the consumed extension options and the
/// options forwarded to `ssh`, keeping the latter in order.
pub fn partition(options: Vec<ParsedOption>) -> (ArcOptions, Vec<ParsedOption>) {
    let mut arc = ArcOptions::default();
    let mut forwarded = Vec::with_capacity(options.len());

    for option in options {
        match option.name {
            OptionName::Long(long) => arc.apply(long, option.value),
            OptionName::Short(_) => forwarded.push(option),
        }
    }

    (arc, forwarded)
}

/// Whether a forwarded option survives filtering.
///
/// Only `-o` settings whose value starts with `Control` (case-sensitive)
/// are rejected.
///
/// # Example
/// ```
/// use az_ssh::args::ParsedOption;
/// use az_ssh::translate::keep_option;
///
/// assert!(!keep_option(&ParsedOption::short('o', "ControlPersist=60s")));
/// assert!(keep_option(&ParsedOption::short('o', "controlmaster=auto")));
/// assert!(keep_option(&ParsedOption::short('S', "ControlPath")));
/// ```
pub fn keep_option(option: &ParsedOption) -> bool {
    !(option.name == OptionName::Short(GENERIC_OPTION_FLAG)
        && option.value.starts_with(BLOCKED_SETTING_PREFIX))
}

/// Tokens for one forwarded option: its name, then its value, skipping
/// empty parts.
pub fn flatten(option: &ParsedOption) -> impl Iterator<Item = String> {
    [option.name.to_string(), option.value.clone()]
        .into_iter()
        .filter(|token| !token.is_empty())
}

/// Assemble the `az ssh` tokens for already parsed arguments
pub fn build_plan(parsed: ParsedArgs, config: &Config) -> InvocationPlan {
    let (arc, forwarded) = partition(parsed.options);
    let mut tokens = Vec::new();

    if arc.enabled {
        tokens.push("arc".to_string());
        let values = [
            (LongOption::Subscription, arc.subscription),
            (LongOption::ResourceGroup, arc.resource_group),
            (LongOption::LocalUser, arc.local_user),
        ];
        for (option, value) in values {
            if let Some(value) = value {
                tokens.push(option.to_string());
                tokens.push(value);
            }
        }
    } else if arc.has_values() {
        debug!("ignoring Azure Arc options without --arc");
    }

    tokens.push("--name".to_string());
    tokens.push(parsed.destination);

    let mut passthrough = Vec::new();
    for option in &forwarded {
        if keep_option(option) {
            passthrough.extend(flatten(option));
        } else {
            debug!("dropping {} {}", option.name, option.value);
        }
    }
    passthrough.extend(parsed.command);

    if !passthrough.is_empty() {
        tokens.push(SEPARATOR.to_string());
        tokens.extend(passthrough);
    }

    InvocationPlan::new(config, tokens)
}

/// Parse OpenSSH arguments (without the program name) and translate them
/// into an `az ssh` invocation.
///
/// # Returns
/// * `Ok(InvocationPlan)` - The command to execute
/// * `Err(AzSshError)` - A usage error from parsing
///
/// # Examples
/// ```
/// use az_ssh::{translate, Config};
///
/// let plan = translate(["-t", "-o", "ControlMaster=auto", "host1"], &Config::default()).unwrap();
/// assert_eq!(plan.tokens, vec!["--name", "host1", "--", "-t"]);
/// ```
pub fn translate<I, S>(args: I, config: &Config) -> Result<InvocationPlan>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let parsed = parse(args)?;
    let plan = build_plan(parsed, config);
    debug!("translated to: {}", plan);
    Ok(plan)
}
