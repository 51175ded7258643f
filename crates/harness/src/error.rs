// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the harness.
//!
//! All failures are raised at the point of detection and carry their full
//! diagnostic payload; there is no internal logging or retry layer.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// A subprocess exited with a failure status and the caller did not opt
    /// into allowing failures. Renders the command, its trimmed output, and
    /// the numeric exit code.
    #[error("command failed: `{command}`\noutput: {output}\nexit: {code}")]
    CommandFailed {
        command: String,
        output: String,
        code: i32,
    },

    /// The subprocess could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// Contradictory or incomplete manifest configuration.
    #[error("invalid project configuration: {0}")]
    Configuration(String),

    /// A requested sub-path resolves outside its owning project root.
    #[error("path {path:?} escapes project root {root:?}")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// A structured-document lookup found no matching fragment.
    #[error("no element matching `{0}` in captured output")]
    Lookup(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
