// Scripted CommandRunner for unit tests
use super::runner::CommandRunner;
use super::shell::AdbShell;
use super::types::CommandOutput;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

enum Reply {
    Output(CommandOutput),
    Missing,
}

/// Replays queued replies in order and records every argument list it was given.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, stdout: &str) -> Self {
        self.push(Reply::Output(CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }))
    }

    pub fn fail(self, stderr: &str) -> Self {
        self.push(Reply::Output(CommandOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            success: false,
            code: Some(1),
        }))
    }

    /// Next invocation behaves as if the adb binary does not exist.
    pub fn missing_binary(self) -> Self {
        self.push(Reply::Missing)
    }

    fn push(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn into_shell(self) -> AdbShell<ScriptedRunner> {
        AdbShell::with_runner(PathBuf::from("adb"), self)
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, _program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Missing) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            )),
            None => Err(std::io::Error::other(format!(
                "no scripted reply for adb {}",
                args.join(" ")
            ))),
        }
    }
}
