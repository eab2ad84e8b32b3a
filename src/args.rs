use crate::unlock::{Credential, PATTERN_SIZES, UnlockConfig, create_english_config};

pub const PASSWORD_ENV: &str = "UNLOCK_PASSWORD";
pub const IMPL_ENV: &str = "ADB_IMPL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdbImpl {
    Rust,
    Shell,
}

impl AdbImpl {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "rust" => Ok(AdbImpl::Rust),
            "shell" => Ok(AdbImpl::Shell),
            other => Err(format!("Unknown impl '{other}', expected 'rust' or 'shell'")),
        }
    }

    pub fn use_rust(&self) -> bool {
        matches!(self, AdbImpl::Rust)
    }
}

#[derive(Debug)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Debug)]
pub struct Args {
    pub credential: Credential,
    pub pattern_size: Option<u32>,
    pub max_retry: Option<u32>,
    pub device: Option<String>,
    pub adb_impl: AdbImpl,
    pub english_ui: bool,
    pub debug_mode: bool,
}

impl Args {
    /// Parse flags (program name already stripped). `env` looks up
    /// fallbacks for the credential and the ADB implementation.
    pub fn parse_from<I, S>(args: I, env: impl Fn(&str) -> Option<String>) -> Result<Command, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut password: Option<String> = None;
        let mut pattern: Option<Credential> = None;
        let mut pattern_size: Option<u32> = None;
        let mut max_retry: Option<u32> = None;
        let mut device: Option<String> = None;
        let mut adb_impl: Option<AdbImpl> = None;
        let mut english_ui = false;
        let mut debug_mode = false;

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            } else if arg == "--version" || arg == "-v" {
                return Ok(Command::Version);
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--english" {
                english_ui = true;
            } else if let Some(val) = arg.strip_prefix("--password=") {
                password = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--pattern=") {
                pattern = Some(
                    Credential::parse_pattern(val)
                        .ok_or_else(|| format!("Invalid pattern: {val}"))?,
                );
            } else if let Some(val) = arg.strip_prefix("--pattern-size=") {
                let size = parse_number("pattern size", val)?;
                if !PATTERN_SIZES.contains(&size) {
                    return Err(format!(
                        "Pattern size must be between {} and {}, got {size}",
                        PATTERN_SIZES.start(),
                        PATTERN_SIZES.end()
                    ));
                }
                pattern_size = Some(size);
            } else if let Some(val) = arg.strip_prefix("--max-retry=") {
                max_retry = Some(parse_number("retry count", val)?);
            } else if let Some(val) = arg.strip_prefix("--device=") {
                device = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--impl=") {
                adb_impl = Some(AdbImpl::parse(val)?);
            } else {
                return Err(format!("Unknown argument: {arg}"));
            }
        }

        let credential = match (password, pattern) {
            (Some(_), Some(_)) => return Err("Use either --password or --pattern, not both".to_string()),
            (Some(text), None) => Credential::text(text),
            (None, Some(cells)) => cells,
            (None, None) => match env(PASSWORD_ENV) {
                Some(text) => Credential::text(text),
                None => {
                    return Err(format!(
                        "No credential given (--password, --pattern or {PASSWORD_ENV})"
                    ));
                }
            },
        };

        let adb_impl = match adb_impl {
            Some(adb_impl) => adb_impl,
            None => match env(IMPL_ENV) {
                Some(val) => AdbImpl::parse(&val)?,
                None => AdbImpl::Rust,
            },
        };

        Ok(Command::Run(Args {
            credential,
            pattern_size,
            max_retry,
            device,
            adb_impl,
            english_ui,
            debug_mode,
        }))
    }

    /// Defaults with the command line overrides applied.
    pub fn unlock_config(&self) -> UnlockConfig {
        let mut config = if self.english_ui {
            create_english_config()
        } else {
            UnlockConfig::default()
        };
        if let Some(size) = self.pattern_size {
            config.pattern_size = size;
        }
        if let Some(retry) = self.max_retry {
            config.max_retry_times = retry;
        }
        config
    }
}

fn parse_number(what: &str, val: &str) -> Result<u32, String> {
    val.parse::<u32>()
        .map_err(|_| format!("Invalid {what} value: {val}"))
}

pub fn print_help() {
    println!("🔓 Android ADB Lock Screen Unlocker");
    println!();
    println!("USAGE:");
    println!("    android-adb-unlock [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --password=TEXT       PIN or password to enter");
    println!("    --pattern=1,5,9,6     Pattern cells, 1-based row-major (or 1596)");
    println!("    --pattern-size=N      Pattern grid dimension (default: 3)");
    println!("    --max-retry=N         Retry budget for each phase (default: 10)");
    println!("    --device=NAME         Device serial or host:port (default: first device)");
    println!("    --impl=<shell|rust>   Select ADB implementation (default: rust)");
    println!("                          The shell implementation reqires the ADB tool to be installed.");
    println!("    --english             Match English system UI texts (\"Try again\", \"OK\")");
    println!("    --debug               Enable debug logging");
    println!("    --help, -h            Show this help message");
    println!("    --version, -v         Show version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    {PASSWORD_ENV}       Password used when no credential flag is given");
    println!("    {IMPL_ENV}              ADB implementation when --impl is absent");
    println!();
    println!("EXAMPLES:");
    println!("    android-adb-unlock --password=1234");
    println!("    android-adb-unlock --pattern=1,5,9,6 --impl=shell");
    println!("    android-adb-unlock --pattern=1,6,11,16 --pattern-size=4 --debug");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(args: &[&str], env: impl Fn(&str) -> Option<String>) -> Args {
        match Args::parse_from(args, env) {
            Ok(Command::Run(args)) => args,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_password_and_overrides() {
        let args = run(
            &["--password=1234", "--max-retry=3", "--device=emulator-5554", "--debug"],
            no_env,
        );
        assert_eq!(args.credential, Credential::text("1234"));
        assert_eq!(args.device.as_deref(), Some("emulator-5554"));
        assert_eq!(args.adb_impl, AdbImpl::Rust);
        assert!(args.debug_mode);

        let config = args.unlock_config();
        assert_eq!(config.max_retry_times, 3);
        assert_eq!(config.pattern_size, 3);
    }

    #[test]
    fn test_pattern_flag() {
        let args = run(&["--pattern=1,6,11,16", "--pattern-size=4", "--impl=shell"], no_env);
        assert_eq!(args.credential, Credential::cells(vec![1, 6, 11, 16]));
        assert_eq!(args.unlock_config().pattern_size, 4);
        assert_eq!(args.adb_impl, AdbImpl::Shell);
    }

    #[test]
    fn test_english_ui_texts() {
        let config = run(&["--password=1234", "--english"], no_env).unlock_config();
        assert_eq!(config.confirm_label, "OK");
        assert_eq!(config.wrong_credential_hint, "Try again");

        let config = run(&["--password=1234"], no_env).unlock_config();
        assert_eq!(config.confirm_label, "确认");
    }

    #[test]
    fn test_environment_fallbacks() {
        let env = |key: &str| match key {
            PASSWORD_ENV => Some("s3cret".to_string()),
            IMPL_ENV => Some("shell".to_string()),
            _ => None,
        };
        let args = run(&[], env);
        assert_eq!(args.credential, Credential::text("s3cret"));
        assert_eq!(args.adb_impl, AdbImpl::Shell);

        // flags win over the environment
        let args = run(&["--password=1234", "--impl=rust"], env);
        assert_eq!(args.credential, Credential::text("1234"));
        assert_eq!(args.adb_impl, AdbImpl::Rust);
    }

    #[test]
    fn test_help_and_version() {
        assert!(matches!(Args::parse_from(["--help"], no_env), Ok(Command::Help)));
        assert!(matches!(Args::parse_from(["-v"], no_env), Ok(Command::Version)));
    }

    #[test]
    fn test_rejects_bad_input() {
        let bad: [&[&str]; 8] = [
            &["--password=1234", "--pattern=1,2,3,4"],
            &["--pattern=1,x"],
            &["--max-retry=many", "--password=1234"],
            &["--impl=usb", "--password=1234"],
            &["--frobnicate"],
            &["--pattern=1234", "--pattern-size=0"],
            &["--pattern=1234", "--pattern-size=65536"],
            &[],
        ];
        for args in bad {
            assert!(Args::parse_from(args, no_env).is_err(), "{args:?} should fail");
        }
    }
}
