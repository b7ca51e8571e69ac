use std::fmt;
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidSeed { raw: String },
    InvalidBank { raw: String },
    BankRequired,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidBank { raw } => write!(f, "invalid --bank value: {raw:?}"),
            ArgsError::BankRequired => write!(f, "check requires --bank <path> or TRIVIA_BANK"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Check,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "check" => Some(Self::Check),
            "help" | "--help" | "-h" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Resolved settings: flags win over environment, environment over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub bank: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Environment lookups, injectable for tests.
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

pub const BANK_VAR: &str = "TRIVIA_BANK";
pub const SEED_VAR: &str = "TRIVIA_SEED";

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_bank(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidBank { raw });
    }
    Ok(PathBuf::from(raw.trim()))
}

impl Args {
    /// Parse command-line arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values, or unparsable values.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: &dyn Env,
    ) -> Result<Self, ArgsError> {
        let mut argv = argv.into_iter().peekable();

        // Default behavior: play when no subcommand is provided.
        let command = match argv.peek().map(String::as_str) {
            None => Command::Play,
            Some(first) if first.starts_with("--") && first != "--help" => Command::Play,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                argv.next();
                command
            }
        };

        let mut bank = env.var(BANK_VAR).map(parse_bank).transpose()?;
        let mut seed = env.var(SEED_VAR).map(parse_seed).transpose()?;

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "--bank" => bank = Some(parse_bank(require_value(&mut argv, "--bank")?)?),
                "--seed" => seed = Some(parse_seed(require_value(&mut argv, "--seed")?)?),
                "--help" | "-h" => {
                    return Ok(Self {
                        command: Command::Help,
                        bank,
                        seed,
                    });
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if command == Command::Check && bank.is_none() {
            return Err(ArgsError::BankRequired);
        }

        Ok(Self {
            command,
            bank,
            seed,
        })
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [play]  [--bank <path.json>] [--seed <n>]");
    eprintln!("  app check   --bank <path.json>");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  built-in question bank, random seed");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {BANK_VAR}, {SEED_VAR}, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl Env for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| (*v).to_string())
        }
    }

    fn no_env() -> FakeEnv {
        FakeEnv(HashMap::new())
    }

    fn argv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults_to_play() {
        let args = Args::parse(argv(&[]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.bank, None);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn flags_without_subcommand_mean_play() {
        let args = Args::parse(argv(&["--seed", "7", "--bank", "q.json"]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.bank, Some(PathBuf::from("q.json")));
    }

    #[test]
    fn flags_override_environment() {
        let env = FakeEnv(HashMap::from([(SEED_VAR, "1"), (BANK_VAR, "env.json")]));
        let args = Args::parse(argv(&["play", "--seed", "2"]), &env).unwrap();
        assert_eq!(args.seed, Some(2));
        assert_eq!(args.bank, Some(PathBuf::from("env.json")));
    }

    #[test]
    fn check_requires_a_bank() {
        assert_eq!(
            Args::parse(argv(&["check"]), &no_env()).unwrap_err(),
            ArgsError::BankRequired
        );
        let args = Args::parse(argv(&["check", "--bank", "b.json"]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Check);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Args::parse(argv(&["--seed", "abc"]), &no_env()).unwrap_err(),
            ArgsError::InvalidSeed { raw: "abc".into() }
        );
        assert_eq!(
            Args::parse(argv(&["--seed"]), &no_env()).unwrap_err(),
            ArgsError::MissingValue { flag: "--seed" }
        );
        assert_eq!(
            Args::parse(argv(&["roll"]), &no_env()).unwrap_err(),
            ArgsError::UnknownCommand("roll".into())
        );
        assert_eq!(
            Args::parse(argv(&["play", "--fast"]), &no_env()).unwrap_err(),
            ArgsError::UnknownArg("--fast".into())
        );
    }

    #[test]
    fn help_is_recognised() {
        let args = Args::parse(argv(&["--help"]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Help);
    }
}
