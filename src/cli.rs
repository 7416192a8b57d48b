//! Command line and environment configuration
//!
//! Flags override `WORDFORGE_*` environment variables. Anything still
//! missing after both is left for the binary to prompt for.

use std::path::PathBuf;

use crate::cli_error;
use crate::error::{WordForgeError, Result};
use crate::types::GenerationConfig;
use crate::wordlist::{generate, AlphabetOptions, FormatMask};

pub const ENV_LENGTH: &str = "WORDFORGE_LENGTH";
pub const ENV_MASK: &str = "WORDFORGE_MASK";
pub const ENV_OUTPUT: &str = "WORDFORGE_OUTPUT";
pub const ENV_WORKERS: &str = "WORDFORGE_WORKERS";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Version,
    Generate(CliArgs),
}

/// Generation flags; `None` means not given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub length: Option<usize>,
    pub digits: bool,
    pub uppercase: bool,
    pub symbols: bool,
    pub mask: Option<String>,
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
    pub report: Option<PathBuf>,
    pub interactive: bool,
    pub quiet: bool,
    pub dry_run: bool,
}

/// Parse arguments, excluding the program name
pub fn parse_args<I>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        // Support both `--flag value` and `--flag=value`
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = |name: &str| -> Result<String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args
                    .next()
                    .ok_or_else(|| cli_error!("{} requires a value", name)),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "-l" | "--length" => parsed.length = Some(parse_number(&flag, &value(&flag)?)?),
            "-m" | "--mask" => parsed.mask = Some(value(&flag)?),
            "-o" | "--output" => parsed.output = Some(PathBuf::from(value(&flag)?)),
            "-w" | "--workers" => parsed.workers = Some(parse_number(&flag, &value(&flag)?)?),
            "--report" => parsed.report = Some(PathBuf::from(value(&flag)?)),
            "-d" | "--digits" => parsed.digits = true,
            "-u" | "--uppercase" => parsed.uppercase = true,
            "-s" | "--symbols" => parsed.symbols = true,
            "-i" | "--interactive" => parsed.interactive = true,
            "-q" | "--quiet" => parsed.quiet = true,
            "--dry-run" => parsed.dry_run = true,
            other => return Err(cli_error!("unknown argument '{}'", other)),
        }
    }

    Ok(CliCommand::Generate(parsed))
}

fn parse_number(flag: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| cli_error!("{} expects a non-negative integer, got '{}'", flag, value))
}

/// Defaults read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub length: Option<usize>,
    pub mask: Option<String>,
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
}

impl EnvDefaults {
    /// Read `WORDFORGE_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let number = |key: &str| -> Result<Option<usize>> {
            get(key)
                .map(|v| {
                    v.trim().parse().map_err(|_| {
                        WordForgeError::config(format!("{} must be a non-negative integer, got '{}'", key, v))
                    })
                })
                .transpose()
        };

        let defaults = Self {
            length: number(ENV_LENGTH)?,
            mask: get(ENV_MASK),
            output: get(ENV_OUTPUT).map(PathBuf::from),
            workers: number(ENV_WORKERS)?,
        };

        if defaults != Self::default() {
            tracing::debug!(?defaults, "Loaded environment defaults");
        }
        Ok(defaults)
    }
}

impl CliArgs {
    /// Fill unset values from the environment
    pub fn with_env(mut self, env: &EnvDefaults) -> Self {
        self.length = self.length.or(env.length);
        self.mask = self.mask.or_else(|| env.mask.clone());
        self.output = self.output.or_else(|| env.output.clone());
        self.workers = self.workers.or(env.workers);
        self
    }

    /// True when a required value is still missing. Dry runs need no output.
    pub fn is_incomplete(&self) -> bool {
        self.length.is_none() || (self.output.is_none() && !self.dry_run)
    }

    /// Number of words these flags describe, validated like a real run
    /// but without requiring an output path
    pub fn count_words(&self) -> Result<u128> {
        let length = self
            .length
            .ok_or_else(|| cli_error!("missing --length (or set {})", ENV_LENGTH))?;
        let mask = self
            .mask
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(str::parse::<FormatMask>)
            .transpose()?;
        Ok(generate(self.alphabet().build(), length, mask)?.total())
    }

    pub fn alphabet(&self) -> AlphabetOptions {
        AlphabetOptions {
            lowercase: true,
            digits: self.digits,
            uppercase: self.uppercase,
            symbols: self.symbols,
        }
    }

    /// Build a validated configuration
    pub fn into_config(self) -> Result<GenerationConfig> {
        let alphabet = self.alphabet();
        let length = self
            .length
            .ok_or_else(|| cli_error!("missing --length (or set {})", ENV_LENGTH))?;
        let output = self
            .output
            .ok_or_else(|| cli_error!("missing --output (or set {})", ENV_OUTPUT))?;

        let config = GenerationConfig {
            alphabet,
            length,
            mask: self.mask.filter(|m| !m.trim().is_empty()),
            output,
            workers: self.workers.unwrap_or(1),
            report: self.report,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn generate_args(list: &[&str]) -> CliArgs {
        match parse_args(args(list)).unwrap() {
            CliCommand::Generate(a) => a,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_full_command() {
        let parsed = generate_args(&["-l", "4", "-d", "--uppercase", "--mask=LUDS", "-o", "out.txt", "-w", "3"]);
        assert_eq!(parsed.length, Some(4));
        assert!(parsed.digits);
        assert!(parsed.uppercase);
        assert!(!parsed.symbols);
        assert_eq!(parsed.mask.as_deref(), Some("LUDS"));
        assert_eq!(parsed.output, Some(PathBuf::from("out.txt")));
        assert_eq!(parsed.workers, Some(3));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), CliCommand::Help);
        assert_eq!(parse_args(args(&["-l", "3", "-V"])).unwrap(), CliCommand::Version);
    }

    #[test]
    fn test_missing_value() {
        let err = parse_args(args(&["-l"])).unwrap_err();
        assert!(err.to_string().contains("-l requires a value"));
    }

    #[test]
    fn test_bad_number() {
        assert!(parse_args(args(&["--length", "four"])).is_err());
        assert!(parse_args(args(&["--length", "-1"])).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse_args(args(&["--compress"])).unwrap_err();
        assert!(matches!(err, WordForgeError::Cli { .. }));
    }

    #[test]
    fn test_env_defaults_fill_gaps() {
        let vars: HashMap<&str, &str> = [(ENV_LENGTH, "3"), (ENV_OUTPUT, "env.txt"), (ENV_MASK, "")]
            .into_iter()
            .collect();
        let env = EnvDefaults::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(env.mask, None);

        let parsed = generate_args(&["-o", "cli.txt"]).with_env(&env);
        assert_eq!(parsed.length, Some(3));
        assert_eq!(parsed.output, Some(PathBuf::from("cli.txt")));
    }

    #[test]
    fn test_env_bad_number() {
        let err = EnvDefaults::from_lookup(|k| (k == ENV_WORKERS).then(|| "many".to_string())).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_dry_run_needs_no_output() {
        let parsed = generate_args(&["-l", "3", "-d", "--dry-run"]);
        assert!(!parsed.is_incomplete());
        assert_eq!(parsed.count_words().unwrap(), 36 * 36 * 36);

        let bad = generate_args(&["-l", "3", "-m", "LU", "--dry-run"]);
        assert!(bad.count_words().unwrap_err().is_config());
    }

    #[test]
    fn test_into_config_validates() {
        let config = generate_args(&["-l", "2", "-m", "ld", "-o", "x.txt"]).into_config().unwrap();
        assert_eq!(config.length, 2);
        assert_eq!(config.workers, 1);

        let err = generate_args(&["-l", "3", "-m", "ld", "-o", "x.txt"]).into_config().unwrap_err();
        assert!(err.is_config());

        let err = generate_args(&["-o", "x.txt"]).into_config().unwrap_err();
        assert!(err.to_string().contains("missing --length"));
    }
}
