use std::path::PathBuf;

/// Start-up options for the GUI, parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub debug_mode: bool,
    pub adb_path: Option<PathBuf>,
    pub backup_before_uninstall: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            debug_mode: false,
            adb_path: None,
            backup_before_uninstall: true,
        }
    }
}

/// What `main` should do after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Args),
    Help,
    Version,
    Invalid(String),
}

impl Args {
    pub fn parse() -> Option<Self> {
        match Self::parse_from(std::env::args().skip(1)) {
            Parsed::Run(args) => Some(args),
            Parsed::Help => {
                print_help();
                None
            }
            Parsed::Version => {
                println!("Android Debloater v{}", env!("APP_VERSION_DISPLAY"));
                None
            }
            Parsed::Invalid(msg) => {
                eprintln!("❌ {msg}");
                print_help();
                None
            }
        }
    }

    pub fn parse_from<I, S>(args: I) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Args::default();

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--help" || arg == "-h" {
                return Parsed::Help;
            } else if arg == "--version" || arg == "-v" {
                return Parsed::Version;
            } else if arg == "--debug" {
                parsed.debug_mode = true;
            } else if arg == "--no-backup" {
                parsed.backup_before_uninstall = false;
            } else if let Some(path) = arg.strip_prefix("--adb=") {
                if path.is_empty() {
                    return Parsed::Invalid("--adb= needs a path".to_string());
                }
                parsed.adb_path = Some(PathBuf::from(path));
            } else {
                return Parsed::Invalid(format!("Unknown argument: {arg}"));
            }
        }

        Parsed::Run(parsed)
    }
}

fn print_help() {
    println!("📱 Android Debloater");
    println!();
    println!("USAGE:");
    println!("    android-debloater [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)          Launch GUI interface");
    println!("    --adb=<path>        Use this adb binary instead of the bundled one or PATH");
    println!("    --no-backup         Start with 'Back up APKs before uninstall' unchecked");
    println!("    --debug             Log at trace level");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("Log file: ~/adb_debloater.log");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_runs_with_defaults() {
        assert_eq!(Args::parse_from(Vec::<String>::new()), Parsed::Run(Args::default()));
    }

    #[test]
    fn flags_are_applied() {
        let parsed = Args::parse_from(["--debug", "--no-backup", "--adb=/opt/pt/adb"]);
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                debug_mode: true,
                adb_path: Some(PathBuf::from("/opt/pt/adb")),
                backup_before_uninstall: false,
            })
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(Args::parse_from(["--debug", "-h"]), Parsed::Help);
        assert_eq!(Args::parse_from(["--version"]), Parsed::Version);
    }

    #[test]
    fn unknown_or_empty_values_are_invalid() {
        assert!(matches!(Args::parse_from(["--screenshot"]), Parsed::Invalid(_)));
        assert!(matches!(Args::parse_from(["--adb="]), Parsed::Invalid(_)));
    }
}
