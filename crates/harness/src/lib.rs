// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario harness for license-scanner CLI integration tests.
//!
//! Provisions disposable sample projects for many dependency ecosystems
//! inside a sandboxed directory tree, drives the scanner CLI against each,
//! and exposes assertion primitives over the captured output. Scenario code
//! stays declarative: create an app, declare a dependency, run the scanner,
//! assert on what it printed.
//!
//! ```no_run
//! use lichen_harness::{Ecosystem, Harness};
//!
//! # fn main() -> lichen_harness::Result<()> {
//! let mut user = Harness::new("/path/to/repo");
//! user.create_app(Ecosystem::PythonPip)?;
//! user.run_scanner()?;
//! assert!(user.seeing("argparse"));
//! assert!(user.received_exit_code(0));
//! # Ok(())
//! # }
//! ```
//!
//! Execution is single-threaded and synchronous by construction: one
//! scenario is one linear chain of sandbox-reset, scaffold, install, run,
//! assert, with the single live [`CommandResult`] overwritten by each
//! command.

pub mod assertions;
pub mod error;
pub mod harness;
pub mod html;
pub mod runner;
pub mod sandbox;
pub mod scaffold;

pub use error::{HarnessError, Result};
pub use harness::Harness;
pub use html::HtmlFragment;
pub use runner::{CommandResult, CommandRunner, CommandSpec};
pub use sandbox::Sandbox;
pub use scaffold::{Ecosystem, GemSpec, GemfileEntry};
