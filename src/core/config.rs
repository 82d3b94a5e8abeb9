use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ebay: EbayConfig,
    pub email: EmailConfig,
    pub scanning: ScanningConfig,
    pub generator: GeneratorConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EbayConfig {
    pub app_id: String,
    pub cert_id: String,
    pub dev_id: String,
    pub endpoint: String,
}

impl EbayConfig {
    /// Scanning is pointless without an application id.
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub user: String,
    pub password: String,
    /// Alert recipient. `None` disables outgoing alerts.
    pub alert_to: Option<String>,
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        self.alert_to.is_some() && !self.user.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanningConfig {
    pub interval_minutes: u64,
    pub min_profit: i64,
    pub min_confidence: u8,
    pub auto_scan: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            ebay: EbayConfig {
                app_id: env::var("EBAY_APP_ID").unwrap_or_default(),
                cert_id: env::var("EBAY_CERT_ID").unwrap_or_default(),
                dev_id: env::var("EBAY_DEV_ID").unwrap_or_default(),
                endpoint: env::var("EBAY_ENDPOINT").unwrap_or_else(|_| {
                    "https://svcs.ebay.com/services/search/FindingService/v1".to_string()
                }),
            },
            email: EmailConfig {
                smtp_host: env::var("SMTP_HOST")
                    .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                smtp_port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .unwrap_or(587),
                user: env::var("EMAIL_USER").unwrap_or_default(),
                password: env::var("EMAIL_PASS").unwrap_or_default(),
                alert_to: env::var("ALERT_EMAIL").ok().filter(|v| !v.is_empty()),
            },
            scanning: ScanningConfig {
                // A zero period would panic tokio's interval timer.
                interval_minutes: env::var("SCAN_INTERVAL_MINUTES")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .unwrap_or(15)
                    .max(1),
                min_profit: env::var("MIN_PROFIT")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
                min_confidence: env::var("MIN_CONFIDENCE")
                    .unwrap_or_else(|_| "70".to_string())
                    .parse()
                    .unwrap_or(70),
                auto_scan: env::var("DISABLE_AUTO_SCAN")
                    .map(|v| v != "true")
                    .unwrap_or(true),
            },
            generator: GeneratorConfig {
                api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
                model: env::var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
                endpoint: env::var("ANTHROPIC_ENDPOINT")
                    .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".to_string()),
            },
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()
                    .unwrap_or(3001),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}
