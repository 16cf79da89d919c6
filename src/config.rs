use std::net::IpAddr;

pub const DEFAULT_ADMIN_EMAIL: &str = "kontakt@nordmails.net";
pub const DEFAULT_MAIL_FROM: &str = "NordMails <kontakt@nordmails.net>";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub mail: MailConfig,
    pub provider: MailProvider,
    pub environment: Environment,
    pub max_body_size: usize,
    pub success_url: String,
    pub log_level: String,
}

/// Addresses used for the two outgoing messages.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub admin_email: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub enum MailProvider {
    Resend { api_key: String, api_url: String },
    Smtp(SmtpConfig),
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Whether internal error messages may be echoed back to the caller.
    pub fn exposes_errors(self) -> bool {
        self == Environment::Development
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("KONTAKT_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid KONTAKT_HOST: {e}"))?;

        let port: u16 = env_or("KONTAKT_PORT", "8888")
            .parse()
            .map_err(|e| format!("Invalid KONTAKT_PORT: {e}"))?;

        let database_url = env_optional("DATABASE_URL");

        let mail = MailConfig {
            admin_email: env_or("MAIL_TO_ADMIN", DEFAULT_ADMIN_EMAIL),
            from: env_or("MAIL_FROM", DEFAULT_MAIL_FROM),
        };

        let provider = match env_optional("RESEND_API_KEY") {
            Some(api_key) => MailProvider::Resend {
                api_key,
                api_url: env_or("RESEND_API_URL", DEFAULT_RESEND_API_URL),
            },
            None => match (
                env_optional("SMTP_HOST"),
                env_optional("SMTP_PORT"),
                env_optional("SMTP_USER"),
                env_optional("SMTP_PASS"),
            ) {
                (Some(host), Some(port), Some(user), Some(pass)) => MailProvider::Smtp(SmtpConfig {
                    host,
                    port: port
                        .parse()
                        .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?,
                    user,
                    pass,
                }),
                _ => {
                    return Err(
                        "No email provider configured: set RESEND_API_KEY or SMTP_HOST/SMTP_PORT/SMTP_USER/SMTP_PASS"
                            .to_string(),
                    );
                }
            },
        };

        let environment = match env_or("KONTAKT_ENV", "production").as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        };

        let max_body_size: usize = env_or("KONTAKT_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid KONTAKT_MAX_BODY_SIZE: {e}"))?;

        let success_url = env_or("KONTAKT_SUCCESS_URL", "/takk.html");
        let log_level = env_or("KONTAKT_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            database_url,
            mail,
            provider,
            environment,
            max_body_size,
            success_url,
            log_level,
        })
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}
