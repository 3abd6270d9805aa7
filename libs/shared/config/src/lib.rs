use std::env;
use tracing::warn;

pub const DEFAULT_WIDGET_DOMAIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Destination for `appointment_created` notifications. `None` disables delivery.
    pub webhook_url: Option<String>,
    pub environment: String,
    pub widget_domain: String,
    pub api_base_url: String,
    pub port: u16,
    pub seed_doctors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| match value.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("PORT={} is not a valid port, using 3000", value);
                    None
                }
            })
            .unwrap_or(3000);

        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            webhook_url: env::var("WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            environment: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string()),
            widget_domain: env::var("WIDGET_DOMAIN")
                .unwrap_or_else(|_| {
                    warn!("WIDGET_DOMAIN not set, using default");
                    DEFAULT_WIDGET_DOMAIN.to_string()
                }),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            port,
            seed_doctors: env::var("SEED_DOCTORS")
                .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }
        if !config.is_webhook_configured() {
            warn!("WEBHOOK_URL not set, appointment notifications are disabled");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
    }

    pub fn is_webhook_configured(&self) -> bool {
        self.webhook_url.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            webhook_url: None,
            environment: "development".to_string(),
            widget_domain: DEFAULT_WIDGET_DOMAIN.to_string(),
            api_base_url: "http://localhost:3000".to_string(),
            port: 3000,
            seed_doctors: false,
        }
    }
}
