// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scenario orchestration: reset, scaffold, install, run, assert.
//!
//! One [`Harness`] instance drives one linear scenario. Everything it
//! mutates (the sandbox tree, the live command result) is owned by the
//! instance and overwritten in place by the latest operation.

use crate::error::{HarnessError, Result};
use crate::html::{self, HtmlFragment};
use crate::runner::{CommandResult, CommandRunner, CommandSpec};
use crate::sandbox::Sandbox;
use crate::scaffold::{fixture_path, Ecosystem, GemSpec, GemfileEntry, InstallStep, ManifestSource};
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Scenario driver for provisioning sample projects and running the
/// scanner CLI against them.
#[derive(Debug)]
pub struct Harness {
    root: PathBuf,
    sandbox: Sandbox,
    runner: CommandRunner,
    fixtures_dir: PathBuf,
    app_name: String,
    scanner: String,
    scanner_source: Option<PathBuf>,
}

impl Harness {
    /// Create a harness rooted at a repository directory. The sandbox lives
    /// at `<root>/tmp` and fixtures are read from `<root>/spec/fixtures`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            sandbox: Sandbox::new(root.join("tmp")),
            runner: CommandRunner::new(),
            fixtures_dir: root.join("spec").join("fixtures"),
            app_name: "my_app".into(),
            scanner: "license_finder".into(),
            scanner_source: None,
            root,
        }
    }

    /// Override the fixture-manifest directory.
    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = dir.into();
        self
    }

    /// Override the provisioned application's name (default `my_app`).
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Override the scanner CLI name (default `license_finder`).
    pub fn with_scanner(mut self, scanner: impl Into<String>) -> Self {
        self.scanner = scanner.into();
        self
    }

    /// Local source tree the ruby app's Gemfile points its scanner
    /// dependency at. Defaults to the harness root.
    pub fn with_scanner_source(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scanner_source = Some(dir.into());
        self
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Root directory of the provisioned application.
    pub fn app_path(&self) -> PathBuf {
        self.sandbox.project_dir(&self.app_name)
    }

    /// Resolve a sub-path inside the application, rejecting escapes.
    pub fn app_file(&self, sub: impl AsRef<Path>) -> Result<PathBuf> {
        self.sandbox.resolve(&self.app_name, sub.as_ref())
    }

    /// Resolve a sub-path inside any named project, rejecting escapes.
    pub fn project_file(&self, project: &str, sub: impl AsRef<Path>) -> Result<PathBuf> {
        self.sandbox.resolve(project, sub.as_ref())
    }

    // ------------------------------------------------------------------
    // Scaffolding
    // ------------------------------------------------------------------

    /// Reset the sandbox and create the empty application directory.
    pub fn create_empty_project(&mut self) -> Result<()> {
        self.sandbox.reset()?;
        self.sandbox.create_project(&self.app_name)?;
        Ok(())
    }

    /// Reset the sandbox and initialize the ecosystem's manifest: touch an
    /// empty file, copy the fixture wholesale, or run the ecosystem's own
    /// generator.
    pub fn scaffold(&mut self, ecosystem: Ecosystem) -> Result<()> {
        let profile = ecosystem.profile();
        match profile.source {
            ManifestSource::Empty => {
                self.create_empty_project()?;
                fs::File::create(self.app_path().join(profile.manifest))?;
            }
            ManifestSource::Fixture => {
                self.create_empty_project()?;
                fs::copy(
                    fixture_path(&self.fixtures_dir, ecosystem),
                    self.app_path().join(profile.manifest),
                )?;
            }
            ManifestSource::Generated => {
                self.sandbox.reset()?;
                let spec = CommandSpec::new("bundle")
                    .args(["gem", self.app_name.as_str()])
                    .clean_env(true);
                self.runner.run(&spec, &self.sandbox.projects_dir())?;
            }
        }
        Ok(())
    }

    /// Append one dependency declaration in the ecosystem's exact format.
    ///
    /// Fixture-sourced ecosystems carry their dependencies inside the
    /// fixture manifest and reject programmatic edits.
    pub fn declare_dependency(
        &mut self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> Result<()> {
        let line = ecosystem.dependency_line(name, version).ok_or_else(|| {
            HarnessError::Configuration(format!(
                "{ecosystem} dependencies come from the fixture manifest and cannot be appended"
            ))
        })?;
        self.append_to_manifest(ecosystem.profile().manifest, &line)
    }

    /// Append one `gem` line to the application's Gemfile.
    pub fn add_gem_dependency(&mut self, entry: &GemfileEntry) -> Result<()> {
        self.append_to_manifest("Gemfile", &entry.rendered())
    }

    /// Run the ecosystem's install step inside the application directory.
    ///
    /// No-op for ecosystems without one. Ecosystems with a dependency-lock
    /// check run it first and fall back to the full install on mismatch.
    pub fn install(&mut self, ecosystem: Ecosystem) -> Result<()> {
        let Some(step) = ecosystem.profile().install else {
            return Ok(());
        };
        let app = self.app_path();
        match step.fallback_argv {
            None => {
                let spec = command_from_argv(step.argv, &step).allow_failure(step.allow_failure);
                self.runner.run(&spec, &app)?;
            }
            Some(fallback) => {
                let check = command_from_argv(step.argv, &step).allow_failure(true);
                self.runner.run(&check, &app)?;
                if !self.runner.result().exit_code_is(0) {
                    let spec =
                        command_from_argv(fallback, &step).allow_failure(step.allow_failure);
                    self.runner.run(&spec, &app)?;
                }
            }
        }
        Ok(())
    }

    /// Scaffold an application with the ecosystem's canonical sample
    /// dependency and run its install step.
    pub fn create_app(&mut self, ecosystem: Ecosystem) -> Result<()> {
        if ecosystem == Ecosystem::RubyBundle {
            return self.create_ruby_app();
        }
        self.scaffold(ecosystem)?;
        if let Some((name, version)) = ecosystem.profile().default_dependency {
            self.declare_dependency(ecosystem, name, version)?;
        }
        self.install(ecosystem)
    }

    /// Scaffold a ruby application whose Gemfile depends on the scanner's
    /// own source tree by local path, then bundle it.
    pub fn create_ruby_app(&mut self) -> Result<()> {
        self.scaffold(Ecosystem::RubyBundle)?;
        let source = self
            .scanner_source
            .clone()
            .unwrap_or_else(|| self.root.clone());
        let entry = GemfileEntry::new(self.scanner.clone()).path(source);
        self.add_gem_dependency(&entry)?;
        self.install(Ecosystem::RubyBundle)
    }

    /// Materialize a standalone gem project with a generated gemspec.
    ///
    /// The gemspec is validated and rendered before any directory or file
    /// is created, so a configuration error leaves no trace on disk.
    pub fn create_gem(&mut self, gem_name: &str, spec: &GemSpec) -> Result<()> {
        let rendered = spec.render(gem_name)?;
        let dir = self.sandbox.create_project(gem_name)?;
        fs::write(dir.join(format!("{gem_name}.gemspec")), rendered)?;
        Ok(())
    }

    /// Append a Gemfile dependency on a gem already materialized inside
    /// this sandbox, referenced by path rather than registry version. The
    /// optional version constraint is declared alongside the path.
    pub fn declare_local_gem(&mut self, gem_name: &str, version: Option<&str>) -> Result<()> {
        let mut entry = GemfileEntry::new(gem_name).path(self.sandbox.project_dir(gem_name));
        if let Some(version) = version {
            entry = entry.version(version);
        }
        self.add_gem_dependency(&entry)
    }

    /// Declare a Gemfile dependency on a gem already materialized inside
    /// this sandbox, by path, then bundle it.
    pub fn depend_on_local_gem(&mut self, gem_name: &str, version: Option<&str>) -> Result<()> {
        self.declare_local_gem(gem_name, version)?;
        self.install(Ecosystem::RubyBundle)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Run an arbitrary command inside the application directory with a
    /// scrubbed environment. Failures are allowed so the exit code stays
    /// assertable afterwards.
    pub fn execute_command(&mut self, spec: &CommandSpec) -> Result<String> {
        let app = self.app_path();
        let spec = spec.clone().clean_env(true).allow_failure(true);
        self.runner.run(&spec, &app)
    }

    /// Run the scanner CLI (`bundle exec <scanner> --quiet`) inside the
    /// application directory.
    pub fn run_scanner(&mut self) -> Result<String> {
        let spec =
            CommandSpec::new("bundle").args(["exec", self.scanner.as_str(), "--quiet"]);
        self.execute_command(&spec)
    }

    // ------------------------------------------------------------------
    // Assertions over the current result
    // ------------------------------------------------------------------

    /// The current command result. Panics if no command has run yet.
    pub fn result(&self) -> &CommandResult {
        self.runner.result()
    }

    /// Substring match against the captured output.
    pub fn seeing(&self, content: &str) -> bool {
        self.result().contains_text(content)
    }

    /// Full-line literal match against the captured output.
    pub fn seeing_line(&self, content: &str) -> bool {
        self.result().contains_line(content)
    }

    /// Pattern match anywhere in the captured output.
    pub fn seeing_match(&self, pattern: &Regex) -> bool {
        self.result().matches(pattern)
    }

    /// Exact comparison against the recorded exit status.
    pub fn received_exit_code(&self, code: i32) -> bool {
        self.result().exit_code_is(code)
    }

    /// The per-dependency report fragment carrying `name` as its id.
    pub fn dependency_html(&self, name: &str) -> Result<HtmlFragment> {
        html::find_by_id(self.result().output(), name)
    }

    /// The report's top-level heading.
    pub fn html_title(&self) -> Result<HtmlFragment> {
        html::find_tag(self.result().output(), "h1")
    }

    fn append_to_manifest(&self, filename: &str, line: &str) -> Result<()> {
        let path = self.app_file(filename)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

fn command_from_argv(argv: &[&str], step: &InstallStep) -> CommandSpec {
    let mut parts = argv.iter().copied();
    let program = parts.next().unwrap_or_default();
    CommandSpec::new(program)
        .args(parts)
        .clean_env(step.clean_env)
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
