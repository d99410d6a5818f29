use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub api_base: String,
    pub secret_key: String,
    pub currency: String,
}

/// Public-facing application settings, used to build checkout redirect targets.
#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub base_url: String,
}

impl AppSettings {
    pub fn success_url(&self) -> String {
        format!("{}/success", self.base_url.trim_end_matches('/'))
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/pricing", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub payment: PaymentConfig,
    pub app: AppSettings,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", "https://api.liveavatar.com")?
            .set_default("upstream.api_key", "")?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("payment.api_base", "https://api.stripe.com")?
            .set_default("payment.secret_key", "")?
            .set_default("payment.currency", "eur")?
            .set_default("app.base_url", "http://localhost:3000")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("LIVEAVATAR").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Secrets and URLs may be written as ${VAR} in the config file
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.upstream.base_url = expand_env(&app_config.upstream.base_url);
        app_config.upstream.api_key = expand_env(&app_config.upstream.api_key);
        app_config.payment.api_base = expand_env(&app_config.payment.api_base);
        app_config.payment.secret_key = expand_env(&app_config.payment.secret_key);
        app_config.app.base_url = expand_env(&app_config.app.base_url);

        if app_config.upstream.api_key.is_empty() {
            tracing::warn!("upstream.api_key is empty; API-key routes will be rejected upstream");
        }

        Ok(app_config)
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_default()
    } else {
        val.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_braced_variables() {
        std::env::set_var("LIVEAVATAR_TEST_EXPAND", "secret");
        assert_eq!(expand_env("${LIVEAVATAR_TEST_EXPAND}"), "secret");
        assert_eq!(expand_env("${LIVEAVATAR_TEST_MISSING_VAR}"), "");
        assert_eq!(expand_env("plain"), "plain");
    }

    #[test]
    fn redirect_urls_ignore_trailing_slash() {
        let app = AppSettings {
            base_url: "https://demo.example/".to_string(),
        };
        assert_eq!(app.success_url(), "https://demo.example/success");
        assert_eq!(app.cancel_url(), "https://demo.example/pricing");
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let config = AppConfig::load("does-not-exist").unwrap();
        assert_eq!(config.payment.currency, "eur");
        assert_eq!(config.upstream.timeout_secs, 30);
    }
}
