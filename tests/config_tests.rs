use postpub::config::{get_config_dir, FileConfig, Overrides, Settings};

#[test]
fn test_config_dir_is_namespaced() {
    let config_dir = get_config_dir().expect("Should get config dir");
    assert!(config_dir.to_str().unwrap().contains("postpub"));
}

#[test]
fn test_missing_file_is_empty_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = FileConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, FileConfig::default());
}

#[test]
fn test_file_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = FileConfig {
        api_base: Some("https://posts.example.com".to_string()),
        api_token: Some("file-token".to_string()),
    };
    config.save_to(&path).expect("Should save config");

    let loaded = FileConfig::load_from(&path).expect("Should load config");
    assert_eq!(loaded, config);

    let settings = Settings::resolve(|_| None, &loaded).unwrap();
    assert_eq!(settings.posts_endpoint(), "https://posts.example.com/api/posts");
    assert_eq!(settings.api_token, "file-token");
}

#[test]
fn test_bad_toml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_base = [").unwrap();

    let err = FileConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_flag_base_wins_over_broken_env_and_file() {
    let overrides = Overrides {
        api_base: Some("http://good.example/".to_string()),
        api_token: None,
    };
    let file = FileConfig {
        api_base: Some("::broken::".to_string()),
        api_token: Some("file-token".to_string()),
    };

    let settings = Settings::resolve_with(
        &overrides,
        |key| (key == "API_BASE").then(|| "not a url".to_string()),
        &file,
    )
    .expect("Flag value should be the only one validated");

    assert_eq!(settings.posts_endpoint(), "http://good.example/api/posts");
    assert_eq!(settings.api_token, "file-token");
}

#[test]
fn test_broken_env_base_without_flag_is_rejected() {
    let err = Settings::resolve_with(
        &Overrides::default(),
        |key| (key == "API_BASE").then(|| "not a url".to_string()),
        &FileConfig::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("Invalid API base URL: not a url"));
}
