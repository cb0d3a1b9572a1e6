use std::{str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_JWT_ISSUER: &str = "fuelcalc";
const DEFAULT_JWT_EXPIRES_IN_SECS: u64 = 3600;
const DEFAULT_CALCULATOR_URL: &str = "http://localhost:8001/calculate/";
const DEFAULT_CALLBACK_URL: &str = "http://localhost:8080/api/async/update-result";
const DEFAULT_CALCULATOR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IMAGE_DIR: &str = "./images";
const DEFAULT_IMAGE_BASE_URL: &str = "/images";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expires_in: Duration,

    /// Redis backs the logout deny-list when set; an in-process list is used otherwise.
    pub redis_url: Option<String>,

    pub calculator_url: String,
    pub callback_url: String,
    /// Shared secret sent to the calculator. A random token per session when unset.
    pub calculator_service_token: Option<String>,
    pub calculator_timeout: Duration,

    pub image_dir: String,
    pub image_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: optional("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            jwt_expires_in: Duration::from_secs(parsed(
                "JWT_EXPIRES_IN_SECS",
                DEFAULT_JWT_EXPIRES_IN_SECS,
            )?),
            redis_url: optional("REDIS_URL"),
            calculator_url: url("CALCULATOR_URL", DEFAULT_CALCULATOR_URL)?,
            callback_url: url("CALLBACK_URL", DEFAULT_CALLBACK_URL)?,
            calculator_service_token: optional("CALCULATOR_SERVICE_TOKEN"),
            calculator_timeout: Duration::from_secs(parsed(
                "CALCULATOR_TIMEOUT_SECS",
                DEFAULT_CALCULATOR_TIMEOUT_SECS,
            )?),
            image_dir: optional("IMAGE_DIR").unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()),
            image_base_url: optional("IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty variables both count as absent.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
    }
}

/// Absolute URL, validated but kept as written.
fn url(name: &str, default: &str) -> Result<String, ConfigError> {
    let value = optional(name).unwrap_or_else(|| default.to_string());

    match url::Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
    }
}
