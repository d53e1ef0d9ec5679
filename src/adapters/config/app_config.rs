use config::Config;
use error_stack::{report, ResultExt};
use thiserror::Error;

use super::{
    auth_config::AuthConfig, server_config::ServerConfig, sheets_config::SpreadsheetConfig,
    telemetry_config::TelemetryConfig,
};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sheets: SpreadsheetConfig,
    pub auth: AuthConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Failed to assemble configuration sources")]
    Build,
    #[error("Invalid configuration value at '{0}'")]
    InvalidField(String),
}

const DEFAULTS: &[(&str, &str)] = &[
    ("server.host", "0.0.0.0"),
    ("server.port", "3000"),
    (
        "sheets.spreadsheet_id",
        "1MeCb_ClcxP-H_e6vYid49l-ayRd0cF-TE_StXRO9dnM",
    ),
    ("sheets.priv_key", "service-account.json"),
    ("sheets.ranges.transactions", "'2022'!A:H"),
    ("sheets.ranges.categories", "'categories'!A:C"),
    ("sheets.ranges.budgets", "'budgets'!A:B"),
    ("auth.username", "admin"),
    ("auth.password", "change-me"),
    ("auth.secret", "change-me-secret"),
    ("auth.expires_in", "365d"),
    ("telemetry.level", "info"),
    ("telemetry.log_file", "sheets_gateway.log"),
];

/// Environment variable → configuration key. Set, non-empty variables win over
/// the config file and the defaults.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("GOOGLE_SHEET_ID", "sheets.spreadsheet_id"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "sheets.priv_key"),
    ("GOOGLE_TRANSACTION_RANGE", "sheets.ranges.transactions"),
    ("GOOGLE_CATEGORY_RANGE", "sheets.ranges.categories"),
    ("GOOGLE_BUDGET_RANGE", "sheets.ranges.budgets"),
    ("GOOGLE_SA_TYPE", "sheets.service_account.type"),
    ("GOOGLE_SA_PROJECT_ID", "sheets.service_account.project_id"),
    ("GOOGLE_SA_PRIVATE_KEY_ID", "sheets.service_account.private_key_id"),
    ("GOOGLE_SA_PRIVATE_KEY", "sheets.service_account.private_key"),
    ("GOOGLE_SA_CLIENT_EMAIL", "sheets.service_account.client_email"),
    ("GOOGLE_SA_CLIENT_ID", "sheets.service_account.client_id"),
    ("ADMIN_USERNAME", "auth.username"),
    ("ADMIN_PASSWORD", "auth.password"),
    ("JWT_SECRET", "auth.secret"),
    ("JWT_EXPIRES_IN", "auth.expires_in"),
    ("LOG_LEVEL", "telemetry.level"),
    ("LOG_FILE", "telemetry.log_file"),
    ("OTLP_ENDPOINT", "telemetry.otlp_endpoint"),
];

impl AppConfig {
    /// Reads `.env`, the optional config file named by `CONFIG_PATH` (default
    /// `Config.*`) and the process environment.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(report!(AppConfigError::Build))
                    .attach_printable(format!("Failed to read .env: {err}"));
            }
        }
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        Self::from_sources(Some(&config_path), |name| std::env::var(name).ok())
    }

    pub fn from_sources(
        config_path: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, AppConfigError> {
        let mut builder = Config::builder();
        for (key, value) in DEFAULTS {
            builder = builder
                .set_default(*key, *value)
                .change_context(AppConfigError::Build)?;
        }

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        for (var, key) in ENV_OVERRIDES {
            let value = env(var).filter(|value| !value.is_empty());
            builder = builder
                .set_override_option(*key, value)
                .change_context(AppConfigError::Build)
                .attach_printable_lazy(|| format!("Failed to apply {var}"))?;
        }

        let config = builder
            .build()
            .change_context(AppConfigError::Build)
            .attach_printable_lazy(|| format!("Config file: {:?}", config_path))?;

        serde_path_to_error::deserialize(config).map_err(|err| {
            let path = err.path().to_string();
            report!(AppConfigError::InvalidField(path)).attach_printable(err.into_inner().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_env(vars: &[(&str, &str)]) -> error_stack::Result<AppConfig, AppConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        AppConfig::from_sources(None, |name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_apply_without_environment() {
        let config = from_env(&[]).expect("defaults are complete");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.sheets.ranges.transactions.as_ref(), "'2022'!A:H");
        assert_eq!(config.auth.expires_in, "365d");
        assert_eq!(config.telemetry.otlp_endpoint, None);
        assert!(config.sheets.service_account.complete().is_none());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = from_env(&[
            ("PORT", "8080"),
            ("GOOGLE_SHEET_ID", "sheet-123"),
            ("ADMIN_USERNAME", "ops"),
            ("JWT_EXPIRES_IN", "12h"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/secrets/key.json"),
        ])
        .expect("valid overrides");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.sheets.spreadsheet_id.as_ref(), "sheet-123");
        assert_eq!(config.sheets.priv_key.as_ref(), "/secrets/key.json");
        assert_eq!(config.auth.username, "ops");
        assert_eq!(config.auth.expires_in, "12h");
    }

    #[test]
    fn test_empty_variables_fall_back_to_defaults() {
        let config = from_env(&[("ADMIN_PASSWORD", ""), ("PORT", "")]).expect("valid config");
        assert_eq!(config.auth.password, "change-me");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_service_account_fields_from_environment() {
        let config = from_env(&[
            ("GOOGLE_SA_TYPE", "service_account"),
            ("GOOGLE_SA_PROJECT_ID", "project"),
            ("GOOGLE_SA_PRIVATE_KEY_ID", "key-id"),
            ("GOOGLE_SA_PRIVATE_KEY", "line1\\nline2"),
            ("GOOGLE_SA_CLIENT_EMAIL", "sa@project.iam.gserviceaccount.com"),
            ("GOOGLE_SA_CLIENT_ID", "42"),
        ])
        .expect("valid config");

        let fields = config
            .sheets
            .service_account
            .complete()
            .expect("all service account fields present");
        assert_eq!(fields.private_key, "line1\nline2");
        assert_eq!(fields.client_id, "42");
    }

    #[test]
    fn test_invalid_port_reports_field_path() {
        let report = from_env(&[("PORT", "not-a-port")]).expect_err("port must be numeric");
        match report.current_context() {
            AppConfigError::InvalidField(path) => assert_eq!(path, "server.port"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
