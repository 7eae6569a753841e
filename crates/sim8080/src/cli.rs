use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::config::RunConfig;

pub const USAGE: &str = "usage: sim8080 [PROGRAM] [--max-steps N] [--clock-ms N]\n\
    PROGRAM is a file of hex bytes or inline hex text, e.g. \"3E 05 3C 76\".";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub program: Option<String>,
    pub max_steps: Option<u64>,
    pub clock_ms: Option<u64>,
}

impl CliArgs {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--max-steps" {
                parsed.max_steps = Some(flag_value(&arg, args.next())?);
            } else if arg == "--clock-ms" {
                parsed.clock_ms = Some(flag_value(&arg, args.next())?);
            } else if arg.starts_with("--") {
                bail!("unknown option '{}'", arg);
            } else if parsed.program.is_some() {
                bail!("unexpected argument '{}'", arg);
            } else {
                parsed.program = Some(arg);
            }
        }
        Ok(parsed)
    }

    pub fn to_config(&self) -> RunConfig {
        let mut config = RunConfig::default();
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(ms) = self.clock_ms {
            config.clock = Duration::from_millis(ms);
        }
        config
    }
}

fn flag_value(flag: &str, value: Option<String>) -> Result<u64> {
    let value = value.with_context(|| format!("missing value for {}", flag))?;
    value
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_line() {
        let parsed = CliArgs::parse(args(&[])).unwrap();
        assert_eq!(parsed, CliArgs::default());
        assert_eq!(parsed.to_config(), crate::RunConfig::default());
    }

    #[test]
    fn program_and_flags() {
        let parsed =
            CliArgs::parse(args(&["--clock-ms", "500", "3E 05 76", "--max-steps", "12"])).unwrap();
        assert_eq!(parsed.program.as_deref(), Some("3E 05 76"));
        let config = parsed.to_config();
        assert_eq!(config.max_steps, 12);
        assert_eq!(config.clock, Duration::from_millis(500));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CliArgs::parse(args(&["--max-steps"])).is_err());
        assert!(CliArgs::parse(args(&["--max-steps", "lots"])).is_err());
        assert!(CliArgs::parse(args(&["--fast"])).is_err());
        assert!(CliArgs::parse(args(&["76", "76"])).is_err());
    }
}
