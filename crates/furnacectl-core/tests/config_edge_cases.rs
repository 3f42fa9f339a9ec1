use std::fs;
use std::path::PathBuf;

use furnacectl_core::config::Config;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// 1. Missing config file / nonexistent path
// ---------------------------------------------------------------------------

#[test]
fn load_from_nonexistent_path_returns_defaults() {
    let path = PathBuf::from("/tmp/furnacectl-test-nonexistent/does/not/exist/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).expect("missing file should yield defaults");

    assert_eq!(config.stack_name, "FurnaceStack");
    assert_eq!(config.region, "us-east-1");
    assert!(config.app_name.is_none());
}

// ---------------------------------------------------------------------------
// 2. Empty config file
// ---------------------------------------------------------------------------

#[test]
fn load_empty_config_file_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::load_from_path(&config_path).expect("empty file should parse as default");

    assert_eq!(config.stack_name, "FurnaceStack");
    assert_eq!(config.wait_frequency_secs, 2);
}

// ---------------------------------------------------------------------------
// 3. Corrupt / invalid TOML
// ---------------------------------------------------------------------------

#[test]
fn load_corrupt_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[[[broken").unwrap();

    let result = Config::load_from_path(&config_path);
    assert!(result.is_err(), "corrupt TOML should produce an error");

    let msg = result.unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("Parse"),
        "error should mention parsing: {msg}"
    );
}

// ---------------------------------------------------------------------------
// 4. Partial config keeps defaults for unset keys
// ---------------------------------------------------------------------------

#[test]
fn partial_config_keeps_defaults_for_unset_keys() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
stack_name = "Demo"
region = "eu-central-1"
git_revision = "b75a0c4"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();

    assert_eq!(config.stack_name, "Demo");
    assert_eq!(config.region, "eu-central-1");
    assert_eq!(config.git_revision, "b75a0c4");
    assert_eq!(config.code_deploy_role, "CodeDeployServiceRole");
    assert_eq!(config.elb_name, "ElasticLoadBalancer");
}

// ---------------------------------------------------------------------------
// 5. Full config parses every key
// ---------------------------------------------------------------------------

#[test]
fn full_config_parses_all_keys() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
region = "eu-central-1"
stack_name = "Demo"
app_name = "Web"
code_deploy_role = "DeployRole"
git_revision = "abc123"
git_account = "acme/web-app"
wait_frequency_secs = 5
timeout_secs = 900
elb_name = "FrontendLB"
stage_tag_key = "stage"
update_outdated_instances_only = true
template = "~/templates/stack.yaml"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();

    assert_eq!(config.app_name.as_deref(), Some("Web"));
    assert_eq!(config.wait_frequency_secs, 5);
    assert_eq!(config.timeout_secs, 900);
    assert!(config.update_outdated_instances_only);
    assert_eq!(config.template.as_deref(), Some("~/templates/stack.yaml"));
}

// ---------------------------------------------------------------------------
// 6. Environment overrides
// ---------------------------------------------------------------------------

#[test]
fn env_overrides_take_precedence_over_file_values() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "stack_name = \"FromFile\"\n").unwrap();

    // No other test touches FURNACE_* variables.
    unsafe {
        std::env::set_var("FURNACE_STACK_NAME", "FromEnv");
        std::env::set_var("FURNACE_GIT_REVISION", "deadbee");
    }

    let mut config = Config::load_from_path(&config_path).unwrap();
    config.apply_env_overrides();

    unsafe {
        std::env::remove_var("FURNACE_STACK_NAME");
        std::env::remove_var("FURNACE_GIT_REVISION");
    }

    assert_eq!(config.stack_name, "FromEnv");
    assert_eq!(config.git_revision, "deadbee");
}

// ---------------------------------------------------------------------------
// 7. Template resolution
// ---------------------------------------------------------------------------

#[test]
fn read_template_prefers_override_path() {
    let dir = TempDir::new().unwrap();
    let configured = dir.path().join("configured.yaml");
    let overridden = dir.path().join("override.yaml");
    fs::write(&configured, "configured").unwrap();
    fs::write(&overridden, "override").unwrap();

    let config = Config {
        template: Some(configured.display().to_string()),
        ..Config::default()
    };

    let body = config
        .read_template(Some(overridden.display().to_string().as_str()))
        .unwrap();
    assert_eq!(body, "override");

    let body = config.read_template(None).unwrap();
    assert_eq!(body, "configured");
}

#[test]
fn read_template_without_any_path_is_an_error() {
    let config = Config::default();
    let err = config.read_template(None).unwrap_err();
    assert!(err.to_string().contains("Template"));
}
