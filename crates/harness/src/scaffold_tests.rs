#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case(Ecosystem::RubyBundle, "Gemfile")]
#[case(Ecosystem::PythonPip, "requirements.txt")]
#[case(Ecosystem::NodeNpm, "package.json")]
#[case(Ecosystem::Bower, "bower.json")]
#[case(Ecosystem::Maven, "pom.xml")]
#[case(Ecosystem::Gradle, "build.gradle")]
#[case(Ecosystem::CocoaPods, "Podfile")]
fn test_manifest_file_per_ecosystem(#[case] ecosystem: Ecosystem, #[case] manifest: &str) {
    assert_eq!(ecosystem.profile().manifest, manifest);
}

#[test]
fn test_pip_dependency_line_is_raw_pin() {
    assert_eq!(
        Ecosystem::PythonPip.dependency_line("argparse", "1.2.1"),
        Some("argparse==1.2.1".to_string())
    );
}

#[test]
fn test_npm_dependency_line_is_single_json_object() {
    assert_eq!(
        Ecosystem::NodeNpm.dependency_line("http-server", "0.6.1"),
        Some(r#"{"dependencies":{"http-server":"0.6.1"}}"#.to_string())
    );
}

#[test]
fn test_bower_dependency_line_names_the_app_first() {
    assert_eq!(
        Ecosystem::Bower.dependency_line("gmaps", "0.2.30"),
        Some(r#"{"name":"my_app","dependencies":{"gmaps":"0.2.30"}}"#.to_string())
    );
}

#[test]
fn test_gemfile_dependency_line() {
    assert_eq!(
        Ecosystem::RubyBundle.dependency_line("rake", "0.9.2"),
        Some(r#"gem "rake", "0.9.2""#.to_string())
    );
}

#[rstest]
#[case(Ecosystem::Maven)]
#[case(Ecosystem::Gradle)]
#[case(Ecosystem::CocoaPods)]
fn test_fixture_ecosystems_have_no_append_format(#[case] ecosystem: Ecosystem) {
    assert_eq!(ecosystem.profile().source, ManifestSource::Fixture);
    assert_eq!(ecosystem.dependency_line("anything", "1.0"), None);
}

#[test]
fn test_install_table() {
    let pip = Ecosystem::PythonPip.profile().install.unwrap();
    assert_eq!(pip.argv, ["pip", "install", "-r", "requirements.txt"]);
    assert!(!pip.allow_failure);

    let npm = Ecosystem::NodeNpm.profile().install.unwrap();
    assert_eq!(npm.argv, ["npm", "install"]);
    assert!(npm.allow_failure);

    let bower = Ecosystem::Bower.profile().install.unwrap();
    assert_eq!(bower.argv, ["bower", "install"]);
    assert!(bower.allow_failure);

    let maven = Ecosystem::Maven.profile().install.unwrap();
    assert_eq!(maven.argv, ["mvn", "install"]);

    assert!(Ecosystem::Gradle.profile().install.is_none());

    let pod = Ecosystem::CocoaPods.profile().install.unwrap();
    assert_eq!(pod.argv, ["pod", "install", "--no-integrate"]);
}

#[test]
fn test_ruby_install_checks_the_lock_before_full_install() {
    let ruby = Ecosystem::RubyBundle.profile().install.unwrap();

    assert_eq!(ruby.argv, ["bundle", "check"]);
    assert_eq!(ruby.fallback_argv, Some(["bundle", "install"].as_slice()));
    assert!(ruby.clean_env);
}

#[test]
fn test_ecosystem_tags() {
    let tags: Vec<String> = Ecosystem::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        tags,
        [
            "ruby-bundle",
            "python-pip",
            "node-npm",
            "bower",
            "maven",
            "gradle",
            "cocoapods"
        ]
    );
}

#[test]
fn test_gemfile_entry_with_local_path() {
    let entry = GemfileEntry::new("license_finder").path("/work/tmp/projects/mit_gem");

    assert_eq!(
        entry.rendered(),
        r#"gem "license_finder", path: "/work/tmp/projects/mit_gem""#
    );
}

#[test]
fn test_gemspec_rejects_both_license_keys() {
    let spec = GemSpec::new().license("MIT").licenses(["MIT", "GPL"]);

    let err = spec.render("my_gem").unwrap_err();

    assert!(matches!(err, HarnessError::Configuration(_)));
    assert!(err.to_string().contains("both"));
}

#[test]
fn test_gemspec_requires_a_license_descriptor() {
    let err = GemSpec::new().summary("no license").render("my_gem").unwrap_err();

    assert!(matches!(err, HarnessError::Configuration(_)));
}

#[test]
fn test_gemspec_with_singular_license() {
    let rendered = GemSpec::new()
        .license("MIT")
        .summary("a summary")
        .description("a description")
        .render("mit_gem")
        .unwrap();

    assert!(rendered.contains(r#"s.name = "mit_gem""#));
    assert!(rendered.contains(r#"s.license = "MIT""#));
    assert!(rendered.contains(r#"s.summary = "a summary""#));
    assert!(rendered.contains(r#"s.description = "a description""#));
    assert!(rendered.contains(r#"s.version = "0.0.0""#));
    assert!(!rendered.contains("s.licenses"));
}

#[test]
fn test_gemspec_with_plural_licenses() {
    let rendered = GemSpec::new()
        .licenses(["MIT", "GPL"])
        .render("dual_gem")
        .unwrap();

    assert!(rendered.contains(r#"s.licenses = ["MIT", "GPL"]"#));
}

#[test]
fn test_gemspec_optional_fields_default() {
    let rendered = GemSpec::new().license("BSD").render("bare_gem").unwrap();

    assert!(rendered.contains(r#"s.version = "0.0.0""#));
    assert!(rendered.contains(r#"s.summary = """#));
    assert!(rendered.contains(r#"s.homepage = """#));
}

#[test]
fn test_gemspec_explicit_version_and_homepage() {
    let rendered = GemSpec::new()
        .license("MIT")
        .version("2.1.0")
        .homepage("https://example.com")
        .render("versioned_gem")
        .unwrap();

    assert!(rendered.contains(r#"s.version = "2.1.0""#));
    assert!(rendered.contains(r#"s.homepage = "https://example.com""#));
}

#[test]
fn test_fixture_path_joins_the_manifest_name() {
    let path = fixture_path(Path::new("/repo/spec/fixtures"), Ecosystem::Maven);
    assert_eq!(path, PathBuf::from("/repo/spec/fixtures/pom.xml"));
}
