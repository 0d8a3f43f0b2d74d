use super::*;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.cleaning.build_files);
    assert!(!config.cleaning.index_files);
    assert_eq!(config.cleaning.build_files, DEFAULT_CLEAN_BUILD_FILES);
    assert_eq!(config.cleaning.index_files, DEFAULT_CLEAN_INDEX_FILES);
}

#[test]
fn test_get_bool_keys() {
    let config = Config {
        cleaning: CleaningConfig {
            build_files: false,
            index_files: true,
        },
    };
    assert!(!config.get_bool("Cleaning", "BuildFiles"));
    assert!(config.get_bool("Cleaning", "IndexFiles"));
    assert!(!config.get_bool("Cleaning", "Nonsense"));
    assert!(!config.get_bool("Other", "BuildFiles"));
}

#[test]
fn test_cleaning_from_store() {
    let config = Config::default();
    assert_eq!(CleaningConfig::from_store(&config), config.cleaning);
}

#[test]
fn test_partial_json_fills_defaults() {
    let config: Config = serde_json::from_str(r#"{"cleaning":{"indexFiles":true}}"#).unwrap();
    assert!(config.cleaning.build_files);
    assert!(config.cleaning.index_files);

    let empty: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Config::default());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_from(&dir.path().join("absent.json"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_invalid_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_config_from(&path), Config::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = Config {
        cleaning: CleaningConfig {
            build_files: false,
            index_files: true,
        },
    };

    save_config_to(&path, &config).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"buildFiles\": false"));
    assert_eq!(load_config_from(&path), config);
}

#[test]
fn test_config_path_file_name() {
    let path = config_path();
    assert_eq!(path.file_name().unwrap(), "config.json");
    assert!(path.parent().unwrap().ends_with("inform-ide"));
}
