use super::*;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.search.group_size, None);
    assert_eq!(config.search.leaderboard_size, 5);
    assert!(!config.search.allow_disconnected);
    assert!(!config.search.parallel);
    assert!(!config.graph.simple);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
[search]
group_size = 3
leaderboard_size = 10
parallel = true

[graph]
simple = true

[output]
format = "json"
"#;

    let config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");
    assert_eq!(config.search.group_size, Some(3));
    assert_eq!(config.search.leaderboard_size, 10);
    assert!(config.search.parallel);
    assert!(!config.search.allow_disconnected);
    assert!(config.graph.simple);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_partial_section_keeps_defaults() {
    let config: ProjectConfig =
        toml::from_str("[search]\nallow_disconnected = true\n").expect("parse partial config");
    assert!(config.search.allow_disconnected);
    assert_eq!(config.search.leaderboard_size, 5);
    assert_eq!(config.output, OutputConfig::default());
}

#[test]
fn test_template_parses_to_defaults() {
    let config: ProjectConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("parse template");
    assert_eq!(config, ProjectConfig::default());
}

#[test]
fn test_unknown_format_is_rejected() {
    let result: Result<ProjectConfig, _> = toml::from_str("[output]\nformat = \"xml\"\n");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
}

#[test]
fn test_load_broken_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[search\ngroup_size = ").unwrap();
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
}

#[test]
fn test_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[search]\ngroup_size = 2\n").unwrap();
    assert_eq!(load_project_config(dir.path()).search.group_size, Some(2));
}

#[test]
fn test_explicit_file_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(load_config_file(&missing).is_err());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "leaderboard_size = [").unwrap();
    assert!(load_config_file(&broken).is_err());
}
