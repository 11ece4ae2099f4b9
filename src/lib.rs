pub mod adb;
pub mod args;
pub mod gui;
pub mod logging;
pub mod packages;
pub mod update;

pub use adb::{AdbError, AdbResult, AdbShell};
pub use args::Args;
