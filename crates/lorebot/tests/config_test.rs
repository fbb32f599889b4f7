//! Configuration layering tests.

use lorebot::{LorebotConfig, PagingConfig};
use lorebot_error::{ConfigErrorKind, LorebotErrorKind};
use std::io::Write;

#[test]
fn test_bundled_defaults() {
    let config = LorebotConfig::from_toml("").unwrap();

    assert_eq!(config, LorebotConfig::default());
    assert_eq!(config.graphql().token_env(), "GRAPHQL_TOKEN");
    assert_eq!(config.discord().token_env(), "DISCORD_TOKEN");
    assert_eq!(config.discord().guild_id(), &None);
    assert_eq!(*config.paging().idle_timeout_secs(), 300);
    assert_eq!(config.paging().page_size(), 10);
    assert_eq!(*config.paging().max_content_len(), 1900);
}

#[test]
fn test_overrides_replace_single_keys() {
    let config = LorebotConfig::from_toml(
        r#"
        [graphql]
        endpoint = "https://lore.example.net/graphql"

        [discord]
        guild_id = 4242
        "#,
    )
    .unwrap();

    assert_eq!(config.graphql().endpoint(), "https://lore.example.net/graphql");
    assert_eq!(config.graphql().token_env(), "GRAPHQL_TOKEN");
    assert_eq!(config.discord().guild_id(), &Some(4242));
    assert_eq!(config.discord().token_env(), "DISCORD_TOKEN");
}

#[test]
fn test_page_size_is_clamped() {
    assert_eq!(PagingConfig::default().with_page_size(100).page_size(), 25);
    assert_eq!(PagingConfig::default().with_page_size(0).page_size(), 1);
    assert_eq!(PagingConfig::default().with_page_size(7).page_size(), 7);
}

#[test]
fn test_registry_config_follows_idle_timeout() {
    let paging = PagingConfig::default().with_idle_timeout_secs(60);
    assert_eq!(*paging.registry_config().idle_timeout_secs(), 60);
}

#[test]
fn test_invalid_value_is_a_config_error() {
    let result = LorebotConfig::from_toml(
        r#"
        [paging]
        idle_timeout_secs = "soon"
        "#,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Configuration Error"), "{err}");
    assert!(matches!(
        err.kind(),
        LorebotErrorKind::Config(e) if matches!(e.kind(), ConfigErrorKind::Invalid(_))
    ));
}

#[test]
fn test_explicit_file_is_layered() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[paging]\nmax_content_len = 1000").unwrap();

    let config = LorebotConfig::load(Some(file.path())).unwrap();

    assert_eq!(*config.paging().max_content_len(), 1000);
}

#[test]
fn test_missing_explicit_file_fails() {
    let result = LorebotConfig::load(Some(std::path::Path::new("/nonexistent/lorebot.toml")));
    assert!(result.is_err());
}
