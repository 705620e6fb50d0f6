//! External program invocation shared by the command-backed backends.
//!
//! A [`ToolCommand`] is a program plus any fixed leading arguments, so a
//! backend can be pointed at a wrapper (`xvfb-run pdftoppm`, `sh script.sh`)
//! without changing how it builds its own arguments.

use std::ffi::{OsStr, OsString};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// A program and the arguments that always precede a backend's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Append a fixed leading argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// The program name as shown in messages.
    pub fn display_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Run the program to completion with `args` appended, capturing both
    /// output streams. Stdin is closed.
    pub async fn output<I, S>(&self, args: I) -> std::io::Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running {:?}", cmd.as_std());
        cmd.output().await
    }
}

/// Trimmed, lossily-decoded stderr of a finished process.
pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
