mod common;

use common::{TestEnv, TWO_REMOTES};

#[test]
fn test_unknown_remote_fails_with_hint() {
    let env = TestEnv::with_config(TWO_REMOTES);

    let result = env.run(&["pull", "qa", "--database"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("remote 'qa' is not configured"));
    assert!(result.stderr.contains("remote-sync remotes"));
}

#[test]
fn test_unknown_remote_json_error_event() {
    let env = TestEnv::with_config(TWO_REMOTES);

    let result = env.run(&["pull", "qa", "--json"]);

    assert!(!result.success);
    let last = result.stdout.lines().last().unwrap();
    let event: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(event["event"], "error");
    assert_eq!(event["message"], "remote 'qa' is not configured");
}

#[test]
fn test_push_without_permission_is_refused() {
    let env = TestEnv::with_config(TWO_REMOTES);

    let result = env.run(&["push", "production", "--files", "--yes"]);

    assert!(!result.success);
    assert!(result.stderr.contains("push is not allowed for remote [production]"));
}

#[test]
fn test_incomplete_remote_is_refused() {
    let env = TestEnv::with_config("default = \"qa\"\n[remotes.qa]\nhost = \"deploy@qa\"\n");

    let result = env.run(&["pull", "--files"]);

    assert!(!result.success);
    assert!(result.stderr.contains("missing host or path"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let env = TestEnv::with_config("");

    let result = env.run(&["remotes", "--config", "nope.toml"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Error"));
}
