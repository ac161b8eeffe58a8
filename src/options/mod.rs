//! Command-line option engine
//!
//! Recognises a small, fixed set of POSIX-style flags at the front of the
//! argument list and hands everything after them back untouched, so the
//! remaining arguments can be passed on to the command being launched.

/// A recognised flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Help,
    Verbose,
    Dotenv,
    Env,
    SiteId,
    SiteUi,
    Mobile,
    Noweb,
    Network,
}

/// Static description of one flag, shared by the parser and the usage text.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub flag: Flag,
    pub short: char,
    pub long: &'static str,
    pub takes_value: bool,
    pub help: &'static str,
}

pub static OPTIONS: [OptionSpec; 9] = [
    OptionSpec {
        flag: Flag::Help,
        short: 'h',
        long: "help",
        takes_value: false,
        help: "display this help",
    },
    OptionSpec {
        flag: Flag::Verbose,
        short: 'v',
        long: "verbose",
        takes_value: false,
        help: "display base settings on startup",
    },
    OptionSpec {
        flag: Flag::Dotenv,
        short: 'd',
        long: "dotenv",
        takes_value: false,
        help: "set environment from .env",
    },
    OptionSpec {
        flag: Flag::Env,
        short: 'e',
        long: "env",
        takes_value: true,
        help: "set run environment",
    },
    OptionSpec {
        flag: Flag::SiteId,
        short: 'i',
        long: "site_id",
        takes_value: true,
        help: "set site_id",
    },
    OptionSpec {
        flag: Flag::SiteUi,
        short: 'u',
        long: "site_ui",
        takes_value: true,
        help: "set site_ui",
    },
    OptionSpec {
        flag: Flag::Mobile,
        short: 'm',
        long: "mobile",
        takes_value: false,
        help: "render with mobile ui (site_ui=13)",
    },
    OptionSpec {
        flag: Flag::Noweb,
        short: 'o',
        long: "noweb",
        takes_value: false,
        help: "enable NOT_WEB_MODE",
    },
    OptionSpec {
        flag: Flag::Network,
        short: 'n',
        long: "network",
        takes_value: true,
        help: "set network",
    },
];

impl Flag {
    pub fn spec(self) -> &'static OptionSpec {
        OPTIONS.iter().find(|spec| spec.flag == self).unwrap_or(&OPTIONS[0])
    }

    pub fn long(self) -> &'static str {
        self.spec().long
    }
}

fn by_short(c: char) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.short == c)
}

fn by_long(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.long == name)
}

/// One flag occurrence, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagEvent {
    pub flag: Flag,
    pub value: Option<String>,
}

impl FlagEvent {
    fn new(flag: Flag, value: Option<String>) -> Self {
        Self { flag, value }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub events: Vec<FlagEvent>,
    /// Unrecognised tokens dropped before the first recognised flag.
    pub skipped: Vec<String>,
    /// Arguments left for the downstream command.
    pub remainder: Vec<String>,
    pub warnings: Vec<String>,
}

/// Whether `token` would be consumed as a flag on its own.
fn is_recognized(token: &str) -> bool {
    if token == "--" {
        return true;
    }
    if let Some(long) = token.strip_prefix("--") {
        let name = long.split_once('=').map_or(long, |(name, _)| name);
        return by_long(name).is_some();
    }
    let Some(shorts) = token.strip_prefix('-') else {
        return false;
    };
    if shorts.is_empty() {
        return false;
    }
    for c in shorts.chars() {
        match by_short(c) {
            Some(spec) if spec.takes_value => return true,
            Some(_) => continue,
            None => return false,
        }
    }
    true
}

/// Whether `token` is shaped like an option, recognised or not.
fn looks_like_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Split `args` into flag events and the untouched remainder.
///
/// Unrecognised tokens ahead of the first recognised flag are dropped with a
/// warning (IDE runners put their own options there). A leading bare word is
/// only dropped when the flags after it leave nothing over; otherwise it is
/// the downstream command and every argument is passed through untouched.
pub fn parse(args: &[String]) -> ParsedArgs {
    let Some(start) = args.iter().position(|a| is_recognized(a)) else {
        return ParsedArgs { remainder: args.to_vec(), ..Default::default() };
    };

    let mut parsed = scan_flags(&args[start..]);
    if start > 0 && !looks_like_option(&args[0]) && !parsed.remainder.is_empty() {
        return ParsedArgs { remainder: args.to_vec(), ..Default::default() };
    }

    let mut warnings: Vec<String> = args[..start]
        .iter()
        .map(|token| format!("unrecognized argument '{}' ignored", token))
        .collect();
    warnings.append(&mut parsed.warnings);
    parsed.warnings = warnings;
    parsed.skipped = args[..start].to_vec();
    parsed
}

/// Consume flags from the front of `args` until the first unknown token.
fn scan_flags(args: &[String]) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();
    let mut i = 0;
    while i < args.len() {
        let token = &args[i];
        if token == "--" {
            i += 1;
            break;
        }
        if !is_recognized(token) {
            break;
        }
        i += 1;

        if let Some(long) = token.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (long, None),
            };
            let Some(spec) = by_long(name) else { break };
            if !spec.takes_value {
                parsed.events.push(FlagEvent::new(spec.flag, None));
                continue;
            }
            let value = match inline {
                Some(v) => Some(v),
                None => {
                    let next = args.get(i).cloned();
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            };
            push_valued(&mut parsed, spec, value);
            continue;
        }

        let shorts = &token[1..];
        for (offset, c) in shorts.char_indices() {
            let Some(spec) = by_short(c) else { break };
            if !spec.takes_value {
                parsed.events.push(FlagEvent::new(spec.flag, None));
                continue;
            }
            let attached = &shorts[offset + c.len_utf8()..];
            let value = if !attached.is_empty() {
                Some(attached.to_string())
            } else {
                let next = args.get(i).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            };
            push_valued(&mut parsed, spec, value);
            break;
        }
    }

    parsed.remainder = args[i..].to_vec();
    parsed
}

fn push_valued(parsed: &mut ParsedArgs, spec: &OptionSpec, value: Option<String>) {
    match value {
        Some(v) => parsed.events.push(FlagEvent::new(spec.flag, Some(v))),
        None => parsed.warnings.push(format!("option --{} requires a value", spec.long)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ev(flag: Flag, value: Option<&str>) -> FlagEvent {
        FlagEvent::new(flag, value.map(str::to_string))
    }

    #[test]
    fn test_short_flags_and_remainder() {
        let parsed = parse(&args(&["-e", "production", "-o", "otherarg", "-v"]));
        assert_eq!(parsed.events, vec![ev(Flag::Env, Some("production")), ev(Flag::Noweb, None)]);
        assert_eq!(parsed.remainder, args(&["otherarg", "-v"]));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_long_flags_with_and_without_equals() {
        let parsed = parse(&args(&["--env=staging", "--network", "bss", "--site_ui", "16", "runserver"]));
        assert_eq!(
            parsed.events,
            vec![
                ev(Flag::Env, Some("staging")),
                ev(Flag::Network, Some("bss")),
                ev(Flag::SiteUi, Some("16")),
            ]
        );
        assert_eq!(parsed.remainder, args(&["runserver"]));
    }

    #[test]
    fn test_clustered_and_attached_shorts() {
        let parsed = parse(&args(&["-vo", "-i96", "-mn", "wl"]));
        assert_eq!(
            parsed.events,
            vec![
                ev(Flag::Verbose, None),
                ev(Flag::Noweb, None),
                ev(Flag::SiteId, Some("96")),
                ev(Flag::Mobile, None),
                ev(Flag::Network, Some("wl")),
            ]
        );
        assert!(parsed.remainder.is_empty());
    }

    #[test]
    fn test_leading_junk_is_skipped_with_warning() {
        let parsed = parse(&args(&["foo", "-e", "staging"]));
        assert_eq!(parsed.skipped, args(&["foo"]));
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("foo"));
        assert_eq!(parsed.events, vec![ev(Flag::Env, Some("staging"))]);
    }

    #[test]
    fn test_leading_options_and_values_are_skipped() {
        let parsed = parse(&args(&["--client", "127.0.0.1", "-e", "staging", "runserver"]));
        assert_eq!(parsed.skipped, args(&["--client", "127.0.0.1"]));
        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(parsed.events, vec![ev(Flag::Env, Some("staging"))]);
        assert_eq!(parsed.remainder, args(&["runserver"]));
    }

    #[test]
    fn test_command_with_matching_flags_is_untouched() {
        for argv in [
            &["python", "-m", "pytest"][..],
            &["python", "-v", "-e", "x", "script.py"][..],
            &["manage.py", "-d", "--", "runserver"][..],
        ] {
            let parsed = parse(&args(argv));
            assert!(parsed.events.is_empty(), "{argv:?}");
            assert!(parsed.warnings.is_empty(), "{argv:?}");
            assert!(parsed.skipped.is_empty(), "{argv:?}");
            assert_eq!(parsed.remainder, args(argv));
        }
    }

    #[test]
    fn test_no_flags_leaves_everything() {
        let parsed = parse(&args(&["runserver", "0.0.0.0:8000"]));
        assert!(parsed.events.is_empty());
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.remainder, args(&["runserver", "0.0.0.0:8000"]));
    }

    #[test]
    fn test_stops_at_unknown_option() {
        let parsed = parse(&args(&["-d", "-x", "-v"]));
        assert_eq!(parsed.events, vec![ev(Flag::Dotenv, None)]);
        assert_eq!(parsed.remainder, args(&["-x", "-v"]));
    }

    #[test]
    fn test_double_dash_terminates() {
        let parsed = parse(&args(&["-m", "--", "-v"]));
        assert_eq!(parsed.events, vec![ev(Flag::Mobile, None)]);
        assert_eq!(parsed.remainder, args(&["-v"]));
    }

    #[test]
    fn test_missing_value_warns() {
        let parsed = parse(&args(&["-v", "-e"]));
        assert_eq!(parsed.events, vec![ev(Flag::Verbose, None)]);
        assert_eq!(parsed.warnings, vec!["option --env requires a value".to_string()]);
        assert!(parsed.remainder.is_empty());
    }

    #[test]
    fn test_value_may_look_like_flag() {
        let parsed = parse(&args(&["-e", "-v"]));
        assert_eq!(parsed.events, vec![ev(Flag::Env, Some("-v"))]);
    }
}
