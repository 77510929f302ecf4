use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub env: String,

    #[serde(default = "default_app_host")]
    pub host: String,

    #[serde(default = "default_app_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,

    #[serde(default = "default_jwt_access_ttl")]
    pub access_token_ttl: i64,
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_jwt_access_ttl() -> i64 {
    900 // 15 minutes
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| default_app_env()),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| default_app_port().to_string())
                .parse()
                .unwrap_or(default_app_port()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| default_db_max_connections().to_string())
                .parse()
                .unwrap_or(default_db_max_connections()),
        };

        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            access_token_ttl: env::var("JWT_ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| default_jwt_access_ttl().to_string())
                .parse()
                .unwrap_or(default_jwt_access_ttl()),
        };

        Ok(Config {
            app,
            database,
            jwt,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("APP_PORT");
        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.max_connections, 20);
        assert!(!config.is_production());
    }
}
