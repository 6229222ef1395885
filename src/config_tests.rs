use super::*;
use yare::parameterized;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.loader.method_prefix, "test");
    assert!(config.loader.ignore.is_empty());
    assert!(!config.runner.failfast);
    assert_eq!(config.runner.verbosity, Verbosity::Normal);
}

#[test]
fn parses_full_config() {
    let config = Config::parse(
        r#"
[loader]
method_prefix = "check"
ignore = ["Slow*.check_*"]

[runner]
failfast = true
verbosity = "verbose"
"#,
    )
    .unwrap();
    assert_eq!(config.loader.method_prefix, "check");
    assert_eq!(config.loader.ignore, vec!["Slow*.check_*"]);
    assert!(config.runner.failfast);
    assert_eq!(config.runner.verbosity, Verbosity::Verbose);
}

#[test]
fn partial_sections_keep_defaults() {
    let config = Config::parse("[loader]\nignore = [\"A.test_b\"]\n").unwrap();
    assert_eq!(config.loader.method_prefix, "test");
    assert_eq!(config.runner, RunnerConfig::default());
}

#[parameterized(
    unknown_key = { "[loader]\nprefix = \"x\"\n" },
    bad_verbosity = { "[runner]\nverbosity = \"loud\"\n" },
    not_toml = { "loader = [" },
)]
fn rejects_invalid_config(content: &str) {
    let err = Config::parse(content).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn load_reads_file_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "[runner]\nverbosity = \"quiet\"\n",
    )
    .unwrap();
    let config = Config::load(dir.path());
    assert_eq!(config.runner.verbosity, Verbosity::Quiet);
}

#[test]
fn load_falls_back_when_missing_or_invalid() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::load(dir.path()), Config::default());

    std::fs::write(dir.path().join(CONFIG_FILE), "[runner]\nfailfast = 3\n").unwrap();
    assert_eq!(Config::load(dir.path()), Config::default());
}

#[test]
fn runner_config_builds_collector() {
    let config = RunnerConfig {
        failfast: true,
        verbosity: Verbosity::Quiet,
    };
    let collector = config.collector(2);
    assert_eq!(collector.handler_count(), 1);
    assert!(collector.was_successful());
}

#[test]
fn from_file_reports_path_of_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "[runner]\nfailfast = 3\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config { path: Some(ref p), .. } if p == &path));
}

#[test]
fn from_file_reports_unreadable_file_as_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::create_dir(&path).unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Io { path: ref p, .. } if p == &path));
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn load_falls_back_when_config_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(Config::load(dir.path()), Config::default());
}
