// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking external-command execution and output capture.
//!
//! Commands are described as explicit argument lists plus a working
//! directory, never as interpolated shell strings. Execution is synchronous:
//! the caller blocks until the subprocess exits, and the captured result
//! overwrites whatever the previous command recorded.

use crate::error::{HarnessError, Result};
use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};

/// Variables removed when a command runs with a clean environment, so that
/// nested package-manager invocations behave as if run standalone rather
/// than inside any Bundler context the harness process inherited.
const SCRUBBED_VARS: &[&str] = &[
    "BUNDLE_GEMFILE",
    "BUNDLE_PATH",
    "BUNDLE_BIN_PATH",
    "BUNDLER_VERSION",
    "RUBYOPT",
    "RUBYLIB",
    "GEM_HOME",
    "GEM_PATH",
];

/// Immutable snapshot of the most recently executed command.
#[derive(Clone, Debug, Serialize)]
pub struct CommandResult {
    pub(crate) command: String,
    pub(crate) output: String,
    pub(crate) exit_code: i32,
}

impl CommandResult {
    /// The command line that produced this result, rendered for diagnostics.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Combined stdout and stderr text.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Exit status exactly as the subprocess returned it.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// Description of one command invocation.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    allow_failure: bool,
    clean_env: bool,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            allow_failure: false,
            clean_env: false,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the subprocess only; the harness
    /// process environment is never touched. Clean-env scrubbing is applied
    /// after explicit variables, so ambient package-manager configuration
    /// cannot be reintroduced this way.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((name.into(), value.into()));
        self
    }

    /// Treat a non-zero exit status as an ordinary, assertable result
    /// instead of an error.
    pub fn allow_failure(mut self, allow: bool) -> Self {
        self.allow_failure = allow;
        self
    }

    /// Scrub ambient package-manager environment variables before running.
    pub fn clean_env(mut self, clean: bool) -> Self {
        self.clean_env = clean;
        self
    }

    /// Render the command line for error messages and the recorded result.
    pub fn rendered(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs commands and holds the single live [`CommandResult`].
#[derive(Debug, Default)]
pub struct CommandRunner {
    last: Option<CommandResult>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Execute `spec` with its working directory set to `dir`.
    ///
    /// Captures combined stdout and stderr. A failure exit without
    /// `allow_failure` raises [`HarnessError::CommandFailed`] carrying the
    /// command line, trimmed output, and exit code; nothing is recorded in
    /// that case. Otherwise the result replaces the previous one and the
    /// captured text is returned.
    pub fn run(&mut self, spec: &CommandSpec, dir: &Path) -> Result<String> {
        let rendered = spec.rendered();

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (name, value) in &spec.envs {
            command.env(name, value);
        }
        if spec.clean_env {
            scrub_env(&mut command);
        }

        let captured = command.output().map_err(|source| HarnessError::Spawn {
            command: rendered.clone(),
            source,
        })?;

        let mut output = String::from_utf8_lossy(&captured.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&captured.stderr));
        // Terminated-by-signal has no code; surface it as -1 rather than
        // inventing a translated status.
        let exit_code = captured.status.code().unwrap_or(-1);

        if !captured.status.success() && !spec.allow_failure {
            return Err(HarnessError::CommandFailed {
                command: rendered,
                output: output.trim_end().to_string(),
                code: exit_code,
            });
        }

        self.last = Some(CommandResult {
            command: rendered,
            output: output.clone(),
            exit_code,
        });
        Ok(output)
    }

    /// The current result, if any command has completed.
    pub fn last(&self) -> Option<&CommandResult> {
        self.last.as_ref()
    }

    /// The current result.
    ///
    /// # Panics
    ///
    /// Panics if no command has been executed yet. A scenario must always
    /// run a command before asserting on its output; reaching this without
    /// one is a bug in the scenario, not a recoverable condition.
    #[allow(clippy::panic)]
    pub fn result(&self) -> &CommandResult {
        match &self.last {
            Some(result) => result,
            None => panic!("no command has been executed yet"),
        }
    }
}

fn scrub_env(command: &mut Command) {
    for name in SCRUBBED_VARS {
        command.env_remove(name);
    }
    // Bundler 2.x writes additional BUNDLE_-prefixed state variables.
    for (name, _) in std::env::vars_os() {
        if name.to_string_lossy().starts_with("BUNDLE_") {
            command.env_remove(&name);
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
