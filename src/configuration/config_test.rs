use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    assert!(res.contains("transport = \"wizard\""));
    assert!(res.contains("classifier = \"keyword\""));
    assert!(res.contains("request-timeout = 120000"));
    assert!(!res.contains("session-id"));
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["groundwork", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::Transport), "wizard");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_a_bad_config() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["groundwork", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
