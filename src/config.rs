use std::net::IpAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub site_root: PathBuf,
    pub intake_path: String,
    pub cors_origin: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub notify_to: String,
    pub sheet: Option<SheetConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub id: String,
    pub name: String,
    pub access_token: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let site_root = PathBuf::from(env_or("SITE_ROOT", "."));

        let intake_path = env_or("INTAKE_PATH", "/api/applications");
        if !intake_path.starts_with('/') {
            return Err(format!("Invalid INTAKE_PATH '{intake_path}': must start with '/'"));
        }

        let cors_origin = env_or("CORS_ORIGIN", "*");
        if cors_origin != "*" {
            HeaderValue::from_str(&cors_origin)
                .map_err(|e| format!("Invalid CORS_ORIGIN: {e}"))?;
        }

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        let notify_to = env_required("NOTIFY_TO")?;

        let sheet = match (
            std::env::var("SHEET_ID").ok().filter(|s| !s.trim().is_empty()),
            std::env::var("SHEETS_ACCESS_TOKEN").ok(),
        ) {
            (Some(id), Some(access_token)) => Some(SheetConfig {
                id,
                name: env_or("SHEET_NAME", "Sheet1"),
                access_token,
                api_base: env_or("SHEETS_API_BASE", "https://sheets.googleapis.com"),
            }),
            (Some(_), None) => {
                return Err("SHEET_ID is set but SHEETS_ACCESS_TOKEN is missing".to_string());
            }
            _ => None,
        };

        let smtp = match (
            std::env::var("SMTP_HOST").ok(),
            std::env::var("SMTP_PORT").ok(),
            std::env::var("SMTP_USER").ok(),
            std::env::var("SMTP_PASS").ok(),
            std::env::var("SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            site_root,
            intake_path,
            cors_origin,
            max_body_size,
            log_level,
            notify_to,
            sheet,
            smtp,
        })
    }

    /// Identifier shown in fallback emails; empty when no sheet is configured.
    pub fn sheet_id(&self) -> &str {
        self.sheet.as_ref().map(|s| s.id.as_str()).unwrap_or("")
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
