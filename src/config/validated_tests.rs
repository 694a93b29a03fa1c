//! Tests for validated configuration.

use std::io::Write;
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["vyos-client"];
    full_args.extend(args);
    full_args.push("show-config");
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod required_fields {
    use super::*;

    #[test]
    fn missing_host_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "host", .. })
        ));
    }

    #[test]
    fn host_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["--host", "https://192.0.2.1"]), None).unwrap();

        assert_eq!(config.client.host, "https://192.0.2.1");
    }

    #[test]
    fn host_from_toml() {
        let toml = toml(
            r#"
            [router]
            host = "http://192.0.2.1:8080"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.client.host, "http://192.0.2.1:8080");
    }

    #[test]
    fn relative_host_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--host", "192.0.2.1"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--host", "ftp://192.0.2.1"]), None);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("scheme must be http or https"));
    }

    #[test]
    fn host_with_query_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--host", "https://192.0.2.1/?a=1"]), None);

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
        assert!(err.to_string().contains("query and fragment are not allowed"));
    }

    #[test]
    fn host_with_fragment_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--host", "https://192.0.2.1/#top"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn accepted_host_builds_a_client() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--host", "https://192.0.2.1/"]), None).unwrap();
        assert!(crate::api::VyosClient::new(config.client).is_ok());
    }
}

mod precedence {
    use super::*;

    fn full_toml() -> TomlConfig {
        toml(
            r#"
            [router]
            host = "https://toml.example"
            api_key = "toml-key"
            timeout = 10
        "#,
        )
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&[
            "--host",
            "https://cli.example",
            "--api-key",
            "cli-key",
            "--timeout",
            "3",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&full_toml())).unwrap();

        assert_eq!(config.client.host, "https://cli.example");
        assert_eq!(config.client.api_key, "cli-key");
        assert_eq!(config.client.timeout, Duration::from_secs(3));
    }

    #[test]
    fn toml_fills_missing_cli_values() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&full_toml())).unwrap();

        assert_eq!(config.client.api_key, "toml-key");
        assert_eq!(config.client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn defaults_apply_without_cli_or_toml() {
        let config = ValidatedConfig::from_raw(&cli(&["--host", "https://r"]), None).unwrap();

        assert!(config.client.api_key.is_empty());
        assert!(!config.client.skip_tls_verify);
        assert_eq!(config.client.timeout, Duration::from_secs(30));
        assert!(!config.save);
        assert!(!config.verbose);
    }

    #[test]
    fn boolean_flags_use_or_semantics() {
        let toml = toml(
            r#"
            [router]
            host = "https://r"
            skip_tls_verify = true

            [behavior]
            save = true
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert!(config.client.skip_tls_verify);
        assert!(config.save);

        let config = ValidatedConfig::from_raw(&cli(&["--host", "https://r", "--save"]), None).unwrap();
        assert!(config.save);
    }
}

mod timeout {
    use super::*;

    #[test]
    fn zero_timeout_is_allowed() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--host", "https://r", "--timeout", "0"]), None).unwrap();
        assert!(config.client.timeout.is_zero());
    }

    #[test]
    fn excessive_timeout_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--host", "https://r", "--timeout", "100000"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration { field: "timeout", .. })
        ));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_hides_api_key() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--host", "https://r", "--api-key", "hunter2"]),
            None,
        )
        .unwrap();

        let text = config.to_string();
        assert!(text.contains("https://r"));
        assert!(text.contains("api_key: set"));
        assert!(!text.contains("hunter2"));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[router]\nhost = \"https://file.example\"").unwrap();

        let path = file.path().to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.client.host, "https://file.example");
    }

    #[test]
    fn load_missing_file_returns_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn write_default_config_creates_parseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vyos-client.toml");

        write_default_config(&path).unwrap();

        let loaded = TomlConfig::load(&path).unwrap();
        assert!(loaded.router.host.is_none());
    }

    #[test]
    fn write_default_config_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("vyos-client.toml");

        let result = write_default_config(&path);
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
