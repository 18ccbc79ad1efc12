//! Connection configuration resolution.
//!
//! Settings are layered: `fabriq.toml`, then `FABRIQ_*` environment
//! variables, then command-line flags. The merged result becomes the
//! `ConnectionSettings` handed to the client registry.

use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

use fabriq_api::{
    ConnectionSettings, DEFAULT_LOGIN_DOMAIN, DEFAULT_TIMEOUT_SECS, Platform, TlsMode,
    TransportConfig,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file searched for in the working directory.
pub const CONFIG_FILE: &str = "fabriq.toml";

/// Raw file/environment configuration before flag overrides.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub controller: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub login_domain: Option<String>,
    pub platform: Option<String>,
    pub insecure: Option<bool>,
    pub proxy: Option<String>,
    pub timeout: Option<u64>,
}

/// Load the layered file + environment configuration.
pub fn load() -> Result<FileConfig, CliError> {
    let config = Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed("FABRIQ_"))
        .extract()?;
    Ok(config)
}

/// Merge flag overrides into the loaded configuration and produce
/// connection settings. Flags win over environment and file values.
pub fn resolve(global: &GlobalOpts, file: &FileConfig) -> Result<ConnectionSettings, CliError> {
    let controller = global
        .controller
        .clone()
        .or_else(|| file.controller.clone())
        .ok_or_else(|| missing("controller"))?;

    let username = global
        .user
        .clone()
        .or_else(|| file.user.clone())
        .ok_or_else(|| missing("user"))?;

    let password = global
        .password
        .clone()
        .or_else(|| file.password.clone())
        .ok_or_else(|| missing("password"))?;

    let login_domain = global
        .login_domain
        .clone()
        .or_else(|| file.login_domain.clone())
        .unwrap_or_else(|| DEFAULT_LOGIN_DOMAIN.to_owned());

    let platform = match (global.platform, file.platform.as_deref()) {
        (Some(arg), _) => arg.into(),
        (None, Some(raw)) => raw.parse::<Platform>().map_err(|reason| CliError::Validation {
            field: "platform".into(),
            reason,
        })?,
        (None, None) => Platform::default(),
    };

    let tls = if global.insecure || file.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let proxy = global
        .proxy
        .as_deref()
        .or(file.proxy.as_deref())
        .map(|raw| {
            raw.parse::<url::Url>().map_err(|e| CliError::Validation {
                field: "proxy".into(),
                reason: format!("invalid URL '{raw}': {e}"),
            })
        })
        .transpose()?;

    let timeout_secs = global
        .timeout
        .or(file.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ConnectionSettings {
        base_url: controller,
        username,
        password: password.into(),
        login_domain,
        platform,
        transport: TransportConfig {
            tls,
            proxy,
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}

fn missing(field: &str) -> CliError {
    CliError::MissingConfig {
        field: field.to_owned(),
        field_env: field.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PlatformArg;

    fn bare_global() -> GlobalOpts {
        GlobalOpts {
            controller: None,
            user: None,
            password: None,
            login_domain: None,
            platform: None,
            insecure: false,
            proxy: None,
            timeout: None,
            output: crate::cli::OutputFormat::Table,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            controller: Some("https://file.example.com".into()),
            user: Some("file-user".into()),
            password: Some("file-pass".into()),
            platform: Some("mso".into()),
            ..FileConfig::default()
        };
        let global = GlobalOpts {
            controller: Some("https://flag.example.com".into()),
            platform: Some(PlatformArg::Nd),
            ..bare_global()
        };

        let settings = resolve(&global, &file).expect("settings");
        assert_eq!(settings.base_url, "https://flag.example.com");
        assert_eq!(settings.username, "file-user");
        assert_eq!(settings.platform, Platform::Nd);
        assert_eq!(settings.login_domain, DEFAULT_LOGIN_DOMAIN);
    }

    #[test]
    fn missing_controller_is_a_usage_error() {
        let err = resolve(&bare_global(), &FileConfig::default()).expect_err("no controller");
        assert!(matches!(err, CliError::MissingConfig { ref field, .. } if field == "controller"));
    }

    #[test]
    fn unknown_platform_string_is_rejected() {
        let file = FileConfig {
            controller: Some("https://x".into()),
            user: Some("u".into()),
            password: Some("p".into()),
            platform: Some("apic".into()),
            ..FileConfig::default()
        };
        let err = resolve(&bare_global(), &file).expect_err("bad platform");
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "platform"));
    }

    #[test]
    fn insecure_flag_switches_tls_mode() {
        let file = FileConfig {
            controller: Some("https://x".into()),
            user: Some("u".into()),
            password: Some("p".into()),
            ..FileConfig::default()
        };
        let global = GlobalOpts {
            insecure: true,
            ..bare_global()
        };
        let settings = resolve(&global, &file).expect("settings");
        assert_eq!(settings.transport.tls, TlsMode::DangerAcceptInvalid);
    }
}
