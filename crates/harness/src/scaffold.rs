// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-ecosystem scaffolding data: manifest formats, dependency-line
//! rendering, and install commands.
//!
//! Every ecosystem is one [`Ecosystem`] variant dispatching through a single
//! [`Profile`] table, so adding an ecosystem is one registration point.

use crate::error::{HarnessError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Dependency-management ecosystem a provisioned project is modeled after.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    RubyBundle,
    PythonPip,
    NodeNpm,
    Bower,
    Maven,
    Gradle,
    CocoaPods,
}

/// How an ecosystem's manifest file comes into being.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestSource {
    /// Touch an empty file; dependency lines are appended afterwards.
    Empty,
    /// Copy a pre-built fixture manifest wholesale, no programmatic edits.
    Fixture,
    /// Generated by the ecosystem's own scaffolding command.
    Generated,
}

/// One ecosystem's install invocation.
#[derive(Clone, Copy, Debug)]
pub struct InstallStep {
    pub argv: &'static [&'static str],
    /// Run when the primary command reports failure (dependency-lock check
    /// falling back to a full install).
    pub fallback_argv: Option<&'static [&'static str]>,
    /// Whether a failing install is suppressed rather than fatal.
    pub allow_failure: bool,
    /// Whether ambient package-manager environment variables are scrubbed.
    pub clean_env: bool,
}

/// Everything the harness needs to know about one ecosystem.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub manifest: &'static str,
    pub source: ManifestSource,
    pub install: Option<InstallStep>,
    /// Canonical sample dependency used by the one-call app constructors.
    pub default_dependency: Option<(&'static str, &'static str)>,
}

const RUBY_BUNDLE: Profile = Profile {
    manifest: "Gemfile",
    source: ManifestSource::Generated,
    install: Some(InstallStep {
        argv: &["bundle", "check"],
        fallback_argv: Some(&["bundle", "install"]),
        allow_failure: false,
        clean_env: true,
    }),
    default_dependency: None,
};

const PYTHON_PIP: Profile = Profile {
    manifest: "requirements.txt",
    source: ManifestSource::Empty,
    install: Some(InstallStep {
        argv: &["pip", "install", "-r", "requirements.txt"],
        fallback_argv: None,
        allow_failure: false,
        clean_env: false,
    }),
    default_dependency: Some(("argparse", "1.2.1")),
};

const NODE_NPM: Profile = Profile {
    manifest: "package.json",
    source: ManifestSource::Empty,
    install: Some(InstallStep {
        argv: &["npm", "install"],
        fallback_argv: None,
        allow_failure: true,
        clean_env: false,
    }),
    default_dependency: Some(("http-server", "0.6.1")),
};

const BOWER: Profile = Profile {
    manifest: "bower.json",
    source: ManifestSource::Empty,
    install: Some(InstallStep {
        argv: &["bower", "install"],
        fallback_argv: None,
        allow_failure: true,
        clean_env: false,
    }),
    default_dependency: Some(("gmaps", "0.2.30")),
};

const MAVEN: Profile = Profile {
    manifest: "pom.xml",
    source: ManifestSource::Fixture,
    install: Some(InstallStep {
        argv: &["mvn", "install"],
        fallback_argv: None,
        allow_failure: false,
        clean_env: false,
    }),
    default_dependency: None,
};

const GRADLE: Profile = Profile {
    manifest: "build.gradle",
    source: ManifestSource::Fixture,
    install: None,
    default_dependency: None,
};

const COCOAPODS: Profile = Profile {
    manifest: "Podfile",
    source: ManifestSource::Fixture,
    install: Some(InstallStep {
        argv: &["pod", "install", "--no-integrate"],
        fallback_argv: None,
        allow_failure: false,
        clean_env: false,
    }),
    default_dependency: None,
};

impl Ecosystem {
    /// Every supported ecosystem.
    pub const ALL: [Ecosystem; 7] = [
        Ecosystem::RubyBundle,
        Ecosystem::PythonPip,
        Ecosystem::NodeNpm,
        Ecosystem::Bower,
        Ecosystem::Maven,
        Ecosystem::Gradle,
        Ecosystem::CocoaPods,
    ];

    /// The dispatch table entry for this ecosystem.
    pub const fn profile(self) -> &'static Profile {
        match self {
            Ecosystem::RubyBundle => &RUBY_BUNDLE,
            Ecosystem::PythonPip => &PYTHON_PIP,
            Ecosystem::NodeNpm => &NODE_NPM,
            Ecosystem::Bower => &BOWER,
            Ecosystem::Maven => &MAVEN,
            Ecosystem::Gradle => &GRADLE,
            Ecosystem::CocoaPods => &COCOAPODS,
        }
    }

    /// Render one dependency declaration in this ecosystem's append format,
    /// or `None` for ecosystems whose manifests are not line-appended.
    pub fn dependency_line(self, name: &str, version: &str) -> Option<String> {
        match self {
            Ecosystem::PythonPip => Some(format!("{name}=={version}")),
            Ecosystem::NodeNpm => node_manifest_line(name, version),
            Ecosystem::Bower => bower_manifest_line(name, version),
            Ecosystem::RubyBundle => Some(GemfileEntry::new(name).version(version).rendered()),
            Ecosystem::Maven | Ecosystem::Gradle | Ecosystem::CocoaPods => None,
        }
    }
}

// The single-line npm and bower manifests are rendered through serde structs
// so field order stays fixed and names are JSON-escaped correctly.

#[derive(Serialize)]
struct NodeManifest<'a> {
    dependencies: BTreeMap<&'a str, &'a str>,
}

#[derive(Serialize)]
struct BowerManifest<'a> {
    name: &'a str,
    dependencies: BTreeMap<&'a str, &'a str>,
}

fn node_manifest_line(name: &str, version: &str) -> Option<String> {
    let manifest = NodeManifest {
        dependencies: BTreeMap::from([(name, version)]),
    };
    serde_json::to_string(&manifest).ok()
}

fn bower_manifest_line(name: &str, version: &str) -> Option<String> {
    let manifest = BowerManifest {
        name: "my_app",
        dependencies: BTreeMap::from([(name, version)]),
    };
    serde_json::to_string(&manifest).ok()
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Ecosystem::RubyBundle => "ruby-bundle",
            Ecosystem::PythonPip => "python-pip",
            Ecosystem::NodeNpm => "node-npm",
            Ecosystem::Bower => "bower",
            Ecosystem::Maven => "maven",
            Ecosystem::Gradle => "gradle",
            Ecosystem::CocoaPods => "cocoapods",
        };
        f.write_str(tag)
    }
}

/// One `gem "…"` line in a Gemfile, optionally pinned to a version or to a
/// local path (used to declare dependencies on projects already inside the
/// sandbox).
#[derive(Clone, Debug)]
pub struct GemfileEntry {
    name: String,
    version: Option<String>,
    path: Option<PathBuf>,
}

impl GemfileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            path: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Render the Gemfile line.
    pub fn rendered(&self) -> String {
        let mut line = format!("gem {:?}", self.name);
        if let Some(version) = &self.version {
            line.push_str(&format!(", {version:?}"));
        }
        if let Some(path) = &self.path {
            line.push_str(&format!(", path: {:?}", path.display().to_string()));
        }
        line
    }
}

/// Configuration for a generated gemspec.
///
/// Exactly one of the singular `license` or plural `licenses` fields must be
/// set; supplying both (or neither) is a [`HarnessError::Configuration`],
/// raised synchronously before any file is written.
#[derive(Clone, Debug, Default)]
pub struct GemSpec {
    license: Option<String>,
    licenses: Option<Vec<String>>,
    summary: String,
    description: String,
    version: Option<String>,
    homepage: Option<String>,
}

impl GemSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Singular license descriptor, e.g. `"MIT"`.
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Plural license descriptor, e.g. `["MIT", "GPL"]`.
    pub fn licenses<I, S>(mut self, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.licenses = Some(licenses.into_iter().map(Into::into).collect());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Gem version; defaults to `0.0.0`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Check the license-descriptor invariant without touching any file.
    pub fn validate(&self) -> Result<()> {
        match (&self.license, &self.licenses) {
            (Some(_), Some(_)) => Err(HarnessError::Configuration(
                "can't specify both `license` and `licenses`".into(),
            )),
            (None, None) => Err(HarnessError::Configuration(
                "a gemspec requires a `license` or `licenses` descriptor".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Produce the `Gem::Specification` block for `gem_name`.
    pub fn render(&self, gem_name: &str) -> Result<String> {
        self.validate()?;

        let license_field = match (&self.license, &self.licenses) {
            (Some(license), None) => format!("s.license = {license:?}"),
            (None, Some(licenses)) => format!("s.licenses = {licenses:?}"),
            _ => unreachable!("validate() rules out the other arms"),
        };

        let version = self.version.as_deref().unwrap_or("0.0.0");
        let homepage = self.homepage.as_deref().unwrap_or("");

        Ok(format!(
            "Gem::Specification.new do |s|\n  \
               s.name = {gem_name:?}\n  \
               s.version = {version:?}\n  \
               s.author = \"lichen\"\n  \
               s.summary = {summary:?}\n  \
               {license_field}\n  \
               s.description = {description:?}\n  \
               s.homepage = {homepage:?}\nend\n",
            summary = self.summary,
            description = self.description,
        ))
    }
}

/// Path of the fixture manifest backing a fixture-sourced ecosystem.
pub fn fixture_path(fixtures_dir: &Path, ecosystem: Ecosystem) -> PathBuf {
    fixtures_dir.join(ecosystem.profile().manifest)
}

#[cfg(test)]
#[path = "scaffold_tests.rs"]
mod tests;
