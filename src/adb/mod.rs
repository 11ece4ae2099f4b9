// ADB module - wraps the external `adb` command-line tool.
// Every device interaction in the app is one adb subcommand whose text output
// is parsed here.

pub mod error;
pub mod runner;
pub mod shell;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use error::{AdbError, AdbResult};
pub use runner::{CommandRunner, SystemRunner, locate_adb};
pub use shell::{AdbShell, parse_devices, parse_packages};
pub use types::{CommandOutput, Device};
