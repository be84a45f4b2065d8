use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variables understood without the `DESKPROXY_` prefix.
const LEGACY_ENV_VARS: &[&str] = &["FRESHDESK_API_KEY", "FRESHDESK_DOMAIN", "PORT"];

/// Load configuration from defaults, an optional TOML file and the environment.
///
/// Later layers win: defaults, file, `DESKPROXY_*` variables (with `__` as the
/// nesting separator), then the bare `FRESHDESK_API_KEY`, `FRESHDESK_DOMAIN`
/// and `PORT` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed("DESKPROXY_").split("__"))
        .merge(legacy_env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_env() -> Env {
    Env::raw().only(LEGACY_ENV_VARS).map(|key| {
        let key = key.as_str();
        if key.eq_ignore_ascii_case("PORT") {
            "server.port".into()
        } else if key.eq_ignore_ascii_case("FRESHDESK_API_KEY") {
            "freshdesk.api_key".into()
        } else {
            "freshdesk.domain".into()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[server]
port = 9000
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_config_from_str_invalid_type() {
        let toml = r#"
[server]
port = "not-a-port"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 5000);
            assert_eq!(config.freshdesk.domain, "suportetryvia");
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "deskproxy.toml",
                r#"
[freshdesk]
domain = "acme"
api_key = "file-key"

[server]
host = "127.0.0.1"
port = 3000
"#,
            )?;

            let config =
                load_config(Some(Path::new("deskproxy.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.server.host.to_string(), "127.0.0.1");
            assert_eq!(config.freshdesk.domain, "acme");
            assert_eq!(config.freshdesk.api_key, "file-key");
            Ok(())
        });
    }

    #[test]
    fn test_legacy_env_vars_override_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "deskproxy.toml",
                r#"
[freshdesk]
domain = "from-file"
"#,
            )?;
            jail.set_env("FRESHDESK_API_KEY", "env-key");
            jail.set_env("FRESHDESK_DOMAIN", "from-env");
            jail.set_env("PORT", "7000");

            let config =
                load_config(Some(Path::new("deskproxy.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.freshdesk.api_key, "env-key");
            assert_eq!(config.freshdesk.domain, "from-env");
            assert_eq!(config.server.port, 7000);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_vars_nest() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("DESKPROXY_FRESHDESK__MAX_PAGES", "5");
            jail.set_env("DESKPROXY_FRESHDESK__BASE_URL", "http://127.0.0.1:9999");

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.freshdesk.max_pages, 5);
            assert_eq!(
                config.freshdesk.resolved_base_url(),
                "http://127.0.0.1:9999"
            );
            Ok(())
        });
    }
}
