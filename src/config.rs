/*
 * Responsibility
 * - 環境変数の読み込み (PORT, DATABASE_URL, CORS 許可、Auth 設定)
 * - 不足・不正な設定は起動失敗にする
 * - AUTH_JWT_SECRET が無ければ認証レイヤごと無効 (basic variant)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Identity-provider 連携の設定。存在する場合のみ認証レイヤが載る。
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub leeway_seconds: u64,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        // AUTH_JWT_SECRET が設定されている時だけ issuer/audience を必須にする
        let auth = match std::env::var("AUTH_JWT_SECRET") {
            Ok(jwt_secret) => {
                let issuer = std::env::var("AUTH_ISSUER")
                    .map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

                let audience = std::env::var("AUTH_AUDIENCE")
                    .map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

                let leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);

                Some(AuthConfig {
                    jwt_secret,
                    issuer,
                    audience,
                    leeway_seconds,
                })
            }
            Err(_) => None,
        };

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth,
        })
    }
}
