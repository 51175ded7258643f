// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only predicates over a captured [`CommandResult`].
//!
//! These never fail; they answer yes or no about the output that was
//! actually captured. Obtaining a result in the first place is the
//! responsibility of [`crate::runner::CommandRunner::result`].

use crate::runner::CommandResult;
use regex::Regex;

impl CommandResult {
    /// True iff the captured output contains `content` anywhere.
    pub fn contains_text(&self, content: &str) -> bool {
        self.output.contains(content)
    }

    /// True iff some line of the captured output is exactly `content`.
    /// The needle is matched literally, anchored on the full line.
    pub fn contains_line(&self, content: &str) -> bool {
        let pattern = format!("(?m)^{}$", regex::escape(content));
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(&self.output),
            // regex::escape output always compiles; treat the impossible
            // case as a non-match rather than failing an assertion helper.
            Err(_) => false,
        }
    }

    /// True iff the captured output matches `pattern` anywhere.
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.output)
    }

    /// True iff the recorded exit status equals `code` exactly.
    pub fn exit_code_is(&self, code: i32) -> bool {
        self.exit_code == code
    }
}

#[cfg(test)]
#[path = "assertions_tests.rs"]
mod tests;
