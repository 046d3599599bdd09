#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use sysfeed_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
stream:
  intervl_ms: 500 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.path, "/events");
    assert_eq!(cfg.stream.interval(), Duration::from_secs(1));
    assert_eq!(cfg.stream.channel_capacity, 16);
}

#[test]
fn default_config_matches_minimal_file() {
    let from_file = config::load_from_str("version: 1\n").unwrap();
    let built_in = config::ServerConfig::default();
    built_in.validate().unwrap();
    assert_eq!(from_file.server.listen, built_in.server.listen);
    assert_eq!(from_file.server.path, built_in.server.path);
    assert_eq!(from_file.stream.interval_ms, built_in.stream.interval_ms);
}

#[test]
fn rejects_wrong_version() {
    assert!(config::load_from_str("version: 2\n").is_err());
}

#[test]
fn rejects_out_of_range_interval() {
    let bad = "version: 1\nstream:\n  interval_ms: 10\n";
    let err = config::load_from_str(bad).unwrap_err();
    assert!(err.to_string().contains("interval_ms"));
}

#[test]
fn rejects_bad_listen_and_path() {
    assert!(config::load_from_str("version: 1\nserver:\n  listen: \"nope\"\n").is_err());
    assert!(config::load_from_str("version: 1\nserver:\n  path: \"events\"\n").is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("/nonexistent/sysfeed-test.yaml").unwrap();
    assert_eq!(cfg.server.path, "/events");
}

#[test]
fn existing_file_is_loaded_strictly() {
    let dir = std::env::temp_dir().join(format!("sysfeed-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sysfeed.yaml");

    std::fs::write(&path, "version: 1\nstream:\n  interval_ms: 250\n").unwrap();
    let cfg = config::load_or_default(&path).unwrap();
    assert_eq!(cfg.stream.interval_ms, 250);

    std::fs::write(&path, "version: 1\nbogus: true\n").unwrap();
    assert!(config::load_or_default(&path).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
