//! Integration tests for substitution against the real process environment.
//!
//! These tests verify end-to-end behavior across the public API: documents
//! read from disk through `SubstitutingProvider`, overrides taken from the
//! process environment, and `.env` files layered beneath it.

use std::io::Write;

use envsub_config::{
    ConfigError, ConfigTree, DotenvSource, FileSourceProvider, Format, Layered, ProcessEnv,
    SourceProvider, SubstitutingProvider, SubstitutionEngine,
};
use serial_test::serial;

const APP_YAML: &str = "\
server:
  host: localhost
  port: 8080
  tls-enabled: false
database:
  replicaHosts:
    - db-1
    - db-2
  poolSize: 10
";

fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

fn parse(bytes: &[u8]) -> ConfigTree {
    Format::Yaml.parse(bytes).unwrap()
}

fn render(tree: &ConfigTree) -> Vec<u8> {
    Format::Yaml.render(tree).unwrap()
}

/// Test the documented example: `config.object.key` under `MY_APP`.
#[test]
#[serial]
fn test_nested_example_from_process_env() {
    temp_env::with_var("MY_APP_CONFIG_OBJECT_KEY", Some("test"), || {
        let engine = SubstitutionEngine::new("my_app", ProcessEnv).unwrap();
        let out = engine
            .substitute_document(b"config:\n  object:\n    key: \"value\"\n", Format::Yaml)
            .unwrap();

        assert_eq!(out, render(&parse(b"config:\n  object:\n    key: test\n")));
    });
}

/// Test that the provider wrapper reads, substitutes, and re-renders a file.
#[test]
#[serial]
fn test_substituting_provider_over_files() {
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, "app.yaml", APP_YAML);

    temp_env::with_vars(
        [
            ("SVC_SERVER_PORT", Some("9443")),
            ("SVC_SERVER_TLS_ENABLED", Some("true")),
            ("SVC_DATABASE_REPLICA_HOSTS_1", Some("db-failover")),
            ("SVC_DATABASE_POOL_SIZE", Some("not-a-number")),
        ],
        || {
            let engine = SubstitutionEngine::new("svc", ProcessEnv).unwrap();
            let files = FileSourceProvider::with_base_dir(dir.path());
            let provider = SubstitutingProvider::new(engine, files);

            let tree = parse(&provider.open("app.yaml").unwrap());

            assert_eq!(
                tree.get_path(&["server", "host"]),
                Some(&ConfigTree::from("localhost"))
            );
            assert_eq!(
                tree.get_path(&["server", "port"]),
                Some(&ConfigTree::from(9443))
            );
            assert_eq!(
                tree.get_path(&["server", "tls-enabled"]),
                Some(&ConfigTree::from(true))
            );
            assert_eq!(
                tree.get_path(&["database", "replicaHosts"]),
                Some(&ConfigTree::Sequence(vec![
                    ConfigTree::from("db-1"),
                    ConfigTree::from("db-failover"),
                ]))
            );
            assert_eq!(
                tree.get_path(&["database", "poolSize"]),
                Some(&ConfigTree::from("not-a-number"))
            );
        },
    );
}

/// Test that variables outside the namespace are never consulted.
#[test]
#[serial]
fn test_other_namespaces_are_ignored() {
    temp_env::with_vars(
        [("OTHER_SERVER_PORT", Some("1")), ("SVCX_SERVER_PORT", Some("2"))],
        || {
            let engine = SubstitutionEngine::new("svc", ProcessEnv).unwrap();
            let tree = parse(APP_YAML.as_bytes());
            assert_eq!(engine.substitute(tree.clone()), tree);
        },
    );
}

/// Test that the process environment wins over a `.env` file.
#[test]
#[serial]
fn test_process_env_layered_over_dotenv() {
    let mut env_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(env_file, "SVC_SERVER_HOST=from-dotenv").unwrap();
    writeln!(env_file, "SVC_SERVER_PORT=1111").unwrap();

    temp_env::with_vars(
        [
            ("SVC_SERVER_PORT", Some("2222")),
            ("SVC_SERVER_HOST", None),
        ],
        || {
            let dotenv = DotenvSource::from_path(env_file.path()).unwrap();
            let engine =
                SubstitutionEngine::new("svc", Layered::new(ProcessEnv, dotenv)).unwrap();

            let tree = engine.substitute(parse(APP_YAML.as_bytes()));

            assert_eq!(
                tree.get_path(&["server", "host"]),
                Some(&ConfigTree::from("from-dotenv"))
            );
            assert_eq!(
                tree.get_path(&["server", "port"]),
                Some(&ConfigTree::from(2222))
            );
        },
    );
}

/// Test that the same environment always gives the same output.
#[test]
#[serial]
fn test_repeated_runs_are_identical() {
    temp_env::with_var("SVC_SERVER_PORT", Some("7000"), || {
        let engine = SubstitutionEngine::new("svc", ProcessEnv).unwrap();
        let first = engine.substitute_document(APP_YAML.as_bytes(), Format::Yaml).unwrap();
        let second = engine.substitute_document(APP_YAML.as_bytes(), Format::Yaml).unwrap();
        let again = engine.substitute_document(&first, Format::Yaml).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, again);
    });
}

/// Test that a malformed base document is fatal while a malformed override is not.
#[test]
#[serial]
fn test_only_base_document_errors_are_fatal() {
    temp_env::with_var("SVC_SERVER_PORT", Some("{broken"), || {
        let engine = SubstitutionEngine::new("svc", ProcessEnv).unwrap();

        let out = engine.substitute_document(APP_YAML.as_bytes(), Format::Yaml).unwrap();
        assert_eq!(
            parse(&out).get_path(&["server", "port"]),
            Some(&ConfigTree::from("{broken"))
        );

        let err = engine.substitute_document(b"server: [", Format::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    });
}
