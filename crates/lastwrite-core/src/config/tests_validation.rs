//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use std::time::Duration;

    use crate::config::{Config, SetupFailurePolicy, WebConfig};
    use crate::Error;

    fn config_with_dirs(dirs: &[&str]) -> Config {
        Config {
            dirs: dirs.iter().map(|d| (*d).to_string()).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config_with_dirs(&["/data"]).validate().is_ok());
    }

    #[test]
    fn test_no_dirs_rejected() {
        let result = Config::default().validate();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_blank_dir_rejected() {
        let result = config_with_dirs(&["/data", "  "]).validate();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_refresh_interval_bounds() {
        let mut config = config_with_dirs(&["/data"]);
        config.refresh_interval_secs = 0;
        assert!(config.validate().is_err());

        config.refresh_interval_secs = 3601;
        assert!(config.validate().is_err());

        config.refresh_interval_secs = 1;
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_telemetry_path_must_be_absolute() {
        let mut config = config_with_dirs(&["/data"]);
        config.web.telemetry_path = "metrics".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_address_port() {
        let web = |addr: &str| WebConfig {
            listen_address: addr.to_string(),
            ..WebConfig::default()
        };

        assert!(web(":9150").validate().is_ok());
        assert!(web("localhost:9150").validate().is_ok());
        assert!(web("[::1]:9150").validate().is_ok());
        assert!(web("9150").validate().is_err());
        assert!(web(":http").validate().is_err());
        assert!(web(":70000").validate().is_err());
    }

    #[test]
    fn test_bind_address_widens_bare_port() {
        let web = WebConfig::default();
        assert_eq!(web.bind_address(), "0.0.0.0:9150");

        let web = WebConfig {
            listen_address: "127.0.0.1:8080".to_string(),
            ..WebConfig::default()
        };
        assert_eq!(web.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_watch_roots_dedup_keeps_order() {
        let mut config = config_with_dirs(&["/b", "/a", "/b"]);
        config.recursive = true;

        let roots = config.watch_roots();
        let labels: Vec<&str> = roots.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["/b", "/a"]);
        assert!(roots.iter().all(crate::WatchRoot::is_recursive));
    }

    #[test]
    fn test_setup_failure_policy_parse() {
        assert_eq!(
            "abort".parse::<SetupFailurePolicy>().ok(),
            Some(SetupFailurePolicy::Abort)
        );
        assert_eq!(
            "isolate".parse::<SetupFailurePolicy>().ok(),
            Some(SetupFailurePolicy::Isolate)
        );
        assert!("panic".parse::<SetupFailurePolicy>().is_err());
        assert_eq!(SetupFailurePolicy::Isolate.to_string(), "isolate");
    }
}
