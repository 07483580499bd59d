//! # Configuration Tests
//!
//! These tests mutate process environment variables, so they run serially.

use anyhow::Result;
use serial_test::serial;
use std::{env, fs, path::Path};
use studymate_server::{
    config::{get_config, ConfigError},
    state::build_app_state,
};
use tempfile::tempdir;

const ENV_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "PORT",
    "MAX_WORDS",
    "STUDYMATE_PROVIDER__MODEL_NAME",
    "STUDYMATE_TEST_API_URL",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn write_config(dir: &Path, content: &str) -> Result<String> {
    let path = dir.join("config.yml");
    fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

#[test]
#[serial]
fn test_file_values_and_defaults() -> Result<()> {
    clear_env();
    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        r#"
log_path: "data/sessions.json"
provider:
  provider: "local"
  api_url: "http://localhost:1234/v1/chat/completions"
"#,
    )?;

    let config = get_config(Some(&path))?;

    assert_eq!(config.port, 8501);
    assert_eq!(config.max_words, 1000);
    assert_eq!(config.log_path, "data/sessions.json");
    assert_eq!(config.prompts.summary_template_path, "prompts/summary_template.txt");
    assert_eq!(config.prompts.qa_template_path, "prompts/qa_template.txt");
    assert_eq!(config.provider.provider, "local");
    assert_eq!(config.provider.model_name, "gpt-3.5-turbo");
    assert_eq!(config.provider.api_key, None);
    Ok(())
}

#[test]
#[serial]
fn test_env_substitution_and_overrides() -> Result<()> {
    clear_env();
    env::set_var("STUDYMATE_TEST_API_URL", "http://mock.local/v1/chat/completions");
    env::set_var("PORT", "9100");
    env::set_var("STUDYMATE_PROVIDER__MODEL_NAME", "gpt-4o-mini");
    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        r#"
port: 8000
provider:
  provider: "openai"
  api_url: "${STUDYMATE_TEST_API_URL}"
  model_name: "from-file"
"#,
    )?;

    let config = get_config(Some(&path));
    clear_env();
    let config = config?;

    assert_eq!(config.port, 9100);
    assert_eq!(
        config.provider.api_url.as_deref(),
        Some("http://mock.local/v1/chat/completions")
    );
    assert_eq!(config.provider.model_name, "gpt-4o-mini");
    Ok(())
}

#[test]
#[serial]
fn test_api_key_falls_back_to_environment() -> Result<()> {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-from-env");
    let dir = tempdir()?;
    let path = write_config(dir.path(), "provider:\n  provider: \"openai\"\n")?;

    let config = get_config(Some(&path));
    clear_env();

    assert_eq!(config?.provider.api_key.as_deref(), Some("sk-from-env"));
    Ok(())
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    clear_env();
    let result = get_config(Some("/definitely/not/here/config.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
#[serial]
fn test_missing_api_key_is_fatal_at_startup() -> Result<()> {
    clear_env();
    let dir = tempdir()?;
    let summary = dir.path().join("summary.txt");
    let qa = dir.path().join("qa.txt");
    fs::write(&summary, "Summarize:\n{text}")?;
    fs::write(&qa, "Quiz me:\n{text}")?;
    let path = write_config(
        dir.path(),
        &format!(
            "prompts:\n  summary_template_path: \"{}\"\n  qa_template_path: \"{}\"\n",
            summary.display(),
            qa.display()
        ),
    )?;

    let err = build_app_state(get_config(Some(&path))?).unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    Ok(())
}

#[test]
#[serial]
fn test_missing_template_is_fatal_at_startup() -> Result<()> {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test");
    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        "prompts:\n  summary_template_path: \"/no/such/summary.txt\"\n",
    )?;

    let result = build_app_state(get_config(Some(&path))?);
    clear_env();

    assert!(result.is_err());
    Ok(())
}
