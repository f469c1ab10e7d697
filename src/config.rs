use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub promo: PromoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// 课程表为空时写入示例课程
    #[serde(default)]
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

/// 付费课程唯一可用的优惠码
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoConfig {
    pub code: String,
    /// 折扣百分比，取值 0..=100
    pub discount_percent: u32,
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse_toml(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env()?,
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn parse_toml(config_str: &str) -> Result<Self, String> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    fn from_env() -> Result<Self, String> {
        // 数据库 URL 在无配置文件时必须提供
        let database_url = get_env("DATABASE_URL")
            .ok_or("DATABASE_URL is not set and no config.toml was found")?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 5000u16),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                seed_sample_data: get_env_parse("DB_SEED_SAMPLE_DATA", false),
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET")
                    .unwrap_or_else(|| "change-me-in-production".to_string()),
                access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 604_800i64),
            },
            promo: PromoConfig {
                code: get_env("PROMO_CODE").unwrap_or_default(),
                discount_percent: get_env_parse("PROMO_DISCOUNT", 0u32),
            },
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_SEED_SAMPLE_DATA")
            && let Ok(b) = v.parse()
        {
            self.database.seed_sample_data = b;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("PROMO_CODE") {
            self.promo.code = v;
        }
        if let Ok(v) = env::var("PROMO_DISCOUNT")
            && let Ok(n) = v.parse()
        {
            self.promo.discount_percent = n;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.promo.code.trim().is_empty() {
            return Err("promo.code must not be empty (set PROMO_CODE)".to_string());
        }
        if self.promo.discount_percent > 100 {
            return Err(format!(
                "promo.discount_percent must be between 0 and 100, got {}",
                self.promo.discount_percent
            ));
        }
        if self.jwt.access_token_expires_in <= 0 {
            return Err("jwt.access_token_expires_in must be positive".to_string());
        }
        Ok(())
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
