//! getopt-style parsing of an OpenSSH command line
//!
//! Tokenizing is delegated to `clap_lex`; the grammar comes from
//! [`super::grammar`]. Scanning stops at `--` or at the first positional
//! argument, so a remote command such as `ls -la` is never read as options.

use std::ffi::{OsStr, OsString};

use clap_lex::RawArgs;
use tracing::trace;

use super::grammar::{short_arity, Arity, LongOption, OptionName};
use crate::error::{AzSshError, Result};

/// One option as it appeared on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub name: OptionName,

    /// Option value, empty for flags that take none
    pub value: String,
}

impl ParsedOption {
    /// Create a parsed option
    pub fn new(name: OptionName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Create a short flag without value
    pub fn flag(flag: char) -> Self {
        Self::new(OptionName::Short(flag), "")
    }

    /// Create a short flag with a value
    pub fn short(flag: char, value: impl Into<String>) -> Self {
        Self::new(OptionName::Short(flag), value)
    }
}

/// Result of parsing an OpenSSH command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Recognized options in command-line order
    pub options: Vec<ParsedOption>,

    /// First positional argument
    pub destination: String,

    /// Remote command and its arguments
    pub command: Vec<String>,
}

/// Parse `args` (without the program name) against the OpenSSH grammar
///
/// # Returns
/// * `Ok(ParsedArgs)` - Options in order, destination and remote command
/// * `Err(AzSshError)` - A usage error: unknown option, missing value or
///   missing destination
///
/// # Examples
/// ```
/// use az_ssh::args::{parse, ParsedOption};
///
/// let parsed = parse(["-p", "2222", "-tt", "host1", "uptime"]).unwrap();
/// assert_eq!(
///     parsed.options,
///     vec![
///         ParsedOption::short('p', "2222"),
///         ParsedOption::flag('t'),
///         ParsedOption::flag('t'),
///     ]
/// );
/// assert_eq!(parsed.destination, "host1");
/// assert_eq!(parsed.command, vec!["uptime"]);
///
/// assert!(parse(["-t"]).is_err());
/// ```
pub fn parse<I, S>(args: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let raw = RawArgs::new(args);
    let mut cursor = raw.cursor();
    let mut options = Vec::new();
    let mut positionals = Vec::new();
    // Set when scanning ended on `--` or a positional, with arguments left to drain
    let mut stopped = false;

    while let Some(arg) = raw.next(&mut cursor) {
        if arg.is_escape() {
            stopped = true;
            break;
        }

        if let Some((name, attached)) = arg.to_long() {
            let name = name.map_err(|name| {
                AzSshError::unknown_option(format!("--{}", name.to_string_lossy()))
            })?;
            let long = LongOption::lookup(name)?;

            let value = match (long.arity(), attached) {
                (Arity::Flag, Some(_)) => {
                    return Err(AzSshError::UnexpectedValue(long.to_string()));
                }
                (Arity::Flag, None) => String::new(),
                (Arity::Value, Some(value)) => to_utf8(value)?,
                (Arity::Value, None) => {
                    let value = raw
                        .next_os(&mut cursor)
                        .ok_or_else(|| AzSshError::missing_value(long.to_string()))?;
                    to_utf8(value)?
                }
            };

            trace!("parsed {} {:?}", long, value);
            options.push(ParsedOption::new(OptionName::Long(long), value));
        } else if let Some(mut shorts) = arg.to_short() {
            while let Some(flag) = shorts.next_flag() {
                let flag = flag.map_err(|rest| {
                    AzSshError::unknown_option(format!("-{}", rest.to_string_lossy()))
                })?;

                match short_arity(flag) {
                    None => return Err(AzSshError::unknown_option(format!("-{flag}"))),
                    Some(Arity::Flag) => {
                        trace!("parsed -{}", flag);
                        options.push(ParsedOption::flag(flag));
                    }
                    Some(Arity::Value) => {
                        // Rest of the cluster is the value, else the next argument
                        let value = match shorts.next_value_os() {
                            Some(value) if !value.is_empty() => value,
                            _ => raw
                                .next_os(&mut cursor)
                                .ok_or_else(|| AzSshError::missing_value(format!("-{flag}")))?,
                        };
                        let value = to_utf8(value)?;

                        trace!("parsed -{} {:?}", flag, value);
                        options.push(ParsedOption::short(flag, value));
                        break;
                    }
                }
            }
        } else {
            positionals.push(to_utf8(arg.to_value_os())?);
            stopped = true;
            break;
        }
    }

    // The cursor is past the end once every argument was consumed
    if stopped {
        for rest in raw.remaining(&mut cursor) {
            positionals.push(to_utf8(rest)?);
        }
    }

    let mut positionals = positionals.into_iter();
    let destination = positionals.next().ok_or(AzSshError::MissingDestination)?;

    Ok(ParsedArgs {
        options,
        destination,
        command: positionals.collect(),
    })
}

fn to_utf8(value: &OsStr) -> Result<String> {
    value
        .to_str()
        .map(str::to_owned)
        .ok_or_else(|| AzSshError::InvalidUnicode(value.to_string_lossy().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(option: LongOption, value: &str) -> ParsedOption {
        ParsedOption::new(OptionName::Long(option), value)
    }

    #[test]
    fn test_parse_destination_only() {
        let parsed = parse(["1.2.3.4"]).unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.destination, "1.2.3.4");
        assert!(parsed.command.is_empty());
    }

    #[test]
    fn test_parse_separate_values() {
        let parsed = parse(["-o", "ControlMaster=auto", "-i", "key.pem", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                ParsedOption::short('o', "ControlMaster=auto"),
                ParsedOption::short('i', "key.pem"),
            ]
        );
        assert_eq!(parsed.destination, "host1");
    }

    #[test]
    fn test_parse_attached_values() {
        let parsed = parse(["-p22", "-oUser=admin", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                ParsedOption::short('p', "22"),
                ParsedOption::short('o', "User=admin"),
            ]
        );
    }

    #[test]
    fn test_parse_attached_value_keeps_equals_sign() {
        let parsed = parse(["-o=x", "host1"]).unwrap();
        assert_eq!(parsed.options, vec![ParsedOption::short('o', "=x")]);
    }

    #[test]
    fn test_parse_clustered_flags() {
        let parsed = parse(["-tNq", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                ParsedOption::flag('t'),
                ParsedOption::flag('N'),
                ParsedOption::flag('q'),
            ]
        );
    }

    #[test]
    fn test_parse_cluster_ending_in_value_flag() {
        let parsed = parse(["-tp", "2222", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![ParsedOption::flag('t'), ParsedOption::short('p', "2222")]
        );

        let parsed = parse(["-tp2222", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![ParsedOption::flag('t'), ParsedOption::short('p', "2222")]
        );
    }

    #[test]
    fn test_parse_value_may_look_like_an_option() {
        let parsed = parse(["-o", "-x", "host1"]).unwrap();
        assert_eq!(parsed.options, vec![ParsedOption::short('o', "-x")]);
        assert_eq!(parsed.destination, "host1");
    }

    #[test]
    fn test_parse_empty_value() {
        let parsed = parse(["-l", "", "host1"]).unwrap();
        assert_eq!(parsed.options, vec![ParsedOption::short('l', "")]);
    }

    #[test]
    fn test_parse_preserves_repeated_options_in_order() {
        let parsed = parse(["-v", "-L", "80:a:80", "-v", "-L", "81:b:81", "host1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                ParsedOption::flag('v'),
                ParsedOption::short('L', "80:a:80"),
                ParsedOption::flag('v'),
                ParsedOption::short('L', "81:b:81"),
            ]
        );
    }

    #[test]
    fn test_parse_stops_at_first_positional() {
        let parsed = parse(["host1", "ls", "-la", "--arc"]).unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.destination, "host1");
        assert_eq!(parsed.command, vec!["ls", "-la", "--arc"]);
    }

    #[test]
    fn test_parse_double_dash_ends_options() {
        let parsed = parse(["-t", "--", "-host", "-x"]).unwrap();
        assert_eq!(parsed.options, vec![ParsedOption::flag('t')]);
        assert_eq!(parsed.destination, "-host");
        assert_eq!(parsed.command, vec!["-x"]);
    }

    #[test]
    fn test_parse_single_dash_is_positional() {
        let parsed = parse(["-", "cmd"]).unwrap();
        assert_eq!(parsed.destination, "-");
        assert_eq!(parsed.command, vec!["cmd"]);
    }

    #[test]
    fn test_parse_long_options() {
        let parsed = parse([
            "--arc",
            "--subscription",
            "sub1",
            "--resource-group=rg1",
            "--local-user",
            "admin",
            "server1",
        ])
        .unwrap();
        assert_eq!(
            parsed.options,
            vec![
                long(LongOption::Arc, ""),
                long(LongOption::Subscription, "sub1"),
                long(LongOption::ResourceGroup, "rg1"),
                long(LongOption::LocalUser, "admin"),
            ]
        );
        assert_eq!(parsed.destination, "server1");
    }

    #[test]
    fn test_parse_long_option_prefix() {
        let parsed = parse(["--sub", "sub1", "--res=rg1", "server1"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                long(LongOption::Subscription, "sub1"),
                long(LongOption::ResourceGroup, "rg1"),
            ]
        );
    }

    #[test]
    fn test_parse_long_and_short_interleaved() {
        let parsed = parse(["-t", "--arc", "-o", "User=x", "--local-user", "u", "h"]).unwrap();
        assert_eq!(
            parsed.options,
            vec![
                ParsedOption::flag('t'),
                long(LongOption::Arc, ""),
                ParsedOption::short('o', "User=x"),
                long(LongOption::LocalUser, "u"),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_short_option() {
        let err = parse(["-Z", "host1"]).unwrap_err();
        assert_eq!(err.to_string(), "option -Z not recognized");
        assert!(err.is_usage());
    }

    #[test]
    fn test_parse_unknown_option_inside_cluster() {
        let err = parse(["-tZ", "host1"]).unwrap_err();
        assert_eq!(err.to_string(), "option -Z not recognized");
    }

    #[test]
    fn test_parse_help_is_not_recognized() {
        assert!(parse(["-h", "host1"]).is_err());
        assert!(parse(["--help", "host1"]).is_err());
    }

    #[test]
    fn test_parse_unknown_long_option() {
        let err = parse(["--foo", "host1"]).unwrap_err();
        assert_eq!(err.to_string(), "option --foo not recognized");
    }

    #[test]
    fn test_parse_missing_short_value() {
        let err = parse(["-p"]).unwrap_err();
        assert_eq!(err.to_string(), "option -p requires argument");
    }

    #[test]
    fn test_parse_missing_long_value() {
        let err = parse(["--subscription"]).unwrap_err();
        assert_eq!(err.to_string(), "option --subscription requires argument");
    }

    #[test]
    fn test_parse_value_on_flag_long_option() {
        let err = parse(["--arc=yes", "host1"]).unwrap_err();
        assert_eq!(err.to_string(), "option --arc must not have an argument");
    }

    #[test]
    fn test_parse_missing_destination() {
        for args in [
            vec![],
            vec!["-t"],
            vec!["-o", "User=admin"],
            vec!["--arc", "--subscription", "sub1"],
            vec!["-v", "--"],
        ] {
            let err = parse(args.clone()).unwrap_err();
            assert!(
                matches!(err, AzSshError::MissingDestination),
                "{args:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_parse_options_consuming_every_argument() {
        for args in [
            vec!["-t"],
            vec!["--arc"],
            vec!["-o", "User=x"],
            vec!["-p22"],
            vec!["--subscription=sub1"],
            vec!["--local-user", "admin"],
        ] {
            let err = parse(args.clone()).unwrap_err();
            assert!(
                matches!(err, AzSshError::MissingDestination),
                "{args:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_parse_escape_as_last_argument() {
        let err = parse(["-t", "--"]).unwrap_err();
        assert!(matches!(err, AzSshError::MissingDestination));

        let parsed = parse(["-t", "--", "host1"]).unwrap();
        assert_eq!(parsed.destination, "host1");
        assert!(parsed.command.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_rejects_invalid_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![b'h', 0xff]);
        let err = parse([bad]).unwrap_err();
        assert!(matches!(err, AzSshError::InvalidUnicode(_)));
        assert!(err.is_usage());
    }
}
