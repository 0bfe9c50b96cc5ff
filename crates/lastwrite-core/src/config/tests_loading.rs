//! Loading-focused tests for configuration
//!
//! Tests for configuration file loading, parsing and environment overrides.

#[cfg(test)]
mod loading_tests {
    use std::collections::HashMap;

    use crate::config::{
        load_config, load_toml_file, parse_dir_list, Config, SetupFailurePolicy, ENV_DIRS,
        ENV_LISTEN_ADDRESS, ENV_RECURSIVE, ENV_REFRESH_INTERVAL_SECS,
    };
    use crate::{Error, Result};

    fn write_config(contents: &str) -> Result<(tempfile::TempDir, std::path::PathBuf)> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, contents)?;
        Ok((temp_dir, path))
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_full_toml_file() -> Result<()> {
        let (_dir, path) = write_config(
            r#"
dirs = ["/data", "/srv"]
recursive = true
refresh_interval_secs = 30
setup_failure = "abort"

[web]
listen_address = "127.0.0.1:9999"
telemetry_path = "/scrape"
"#,
        )?;

        let config = load_toml_file(&path)?;
        assert_eq!(config.dirs, vec!["/data".to_string(), "/srv".to_string()]);
        assert!(config.recursive);
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.setup_failure, SetupFailurePolicy::Abort);
        assert_eq!(config.web.listen_address, "127.0.0.1:9999");
        assert_eq!(config.web.telemetry_path, "/scrape");
        Ok(())
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> Result<()> {
        let (_dir, path) = write_config("dirs = [\"/data\"]\n")?;

        let config = load_toml_file(&path)?;
        let defaults = Config::default();
        assert_eq!(config.dirs, vec!["/data".to_string()]);
        assert_eq!(config.refresh_interval_secs, defaults.refresh_interval_secs);
        assert_eq!(config.web, defaults.web);
        assert_eq!(config.setup_failure, SetupFailurePolicy::Isolate);
        Ok(())
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() -> Result<()> {
        let (_dir, path) = write_config("dirs = [\n invalid toml [[[")?;

        let result = load_toml_file(&path);
        assert!(matches!(result, Err(Error::ParseError(_))));
        Ok(())
    }

    #[test]
    fn test_config_path_is_directory() -> Result<()> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;

        let result = load_toml_file(temp_dir.path());
        assert!(matches!(result, Err(Error::IoError(_))));
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_config(Some(std::path::Path::new(
            "/nonexistent/lastwrite/config.toml",
        )));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let config = Config::default().apply_env_from(lookup(&[
            (ENV_DIRS, "/a:/b"),
            (ENV_RECURSIVE, "true"),
            (ENV_LISTEN_ADDRESS, ":9200"),
            (ENV_REFRESH_INTERVAL_SECS, "5"),
        ]))?;

        assert_eq!(config.dirs, vec!["/a".to_string(), "/b".to_string()]);
        assert!(config.recursive);
        assert_eq!(config.web.listen_address, ":9200");
        assert_eq!(config.refresh_interval_secs, 5);
        Ok(())
    }

    #[test]
    fn test_env_absent_leaves_config_untouched() -> Result<()> {
        let config = Config::default().apply_env_from(lookup(&[]))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_env_invalid_bool() {
        let result = Config::default().apply_env_from(lookup(&[(ENV_RECURSIVE, "maybe")]));
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_env_invalid_interval() {
        let result =
            Config::default().apply_env_from(lookup(&[(ENV_REFRESH_INTERVAL_SECS, "soon")]));
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_parse_dir_list_drops_empty_entries() {
        assert_eq!(
            parse_dir_list("/data::/srv/uploads:"),
            vec!["/data".to_string(), "/srv/uploads".to_string()]
        );
        assert!(parse_dir_list("").is_empty());
    }
}
