use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use crate::scheduling::{BookingPolicy, InitialBookingStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub booking: BookingConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Business rules exposed as configuration rather than literals: the
/// booking horizon, the per-phone daily cap, and whether new bookings
/// are auto-confirmed or start out pending moderation.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub horizon_days: i64,
    pub daily_limit: usize,
    pub auto_confirm: bool,
}

impl BookingConfig {
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            horizon_days: self.horizon_days,
            daily_limit: self.daily_limit,
            initial_status: if self.auto_confirm {
                InitialBookingStatus::Confirmed
            } else {
                InitialBookingStatus::Pending
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        let horizon_days = env::var("BOOKING_HORIZON_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .parse::<i64>()
            .context("Failed to parse BOOKING_HORIZON_DAYS")?;

        let daily_limit = env::var("BOOKING_DAILY_LIMIT")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<usize>()
            .context("Failed to parse BOOKING_DAILY_LIMIT")?;

        let auto_confirm = env::var("BOOKING_AUTO_CONFIRM")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("Failed to parse BOOKING_AUTO_CONFIRM")?;

        let environment = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse::<Environment>()
            .unwrap_or(Environment::Development);

        let name = env::var("APP_NAME").unwrap_or_else(|_| "Salon Booking".to_string());

        Ok(Config {
            server: ServerConfig { host, port },
            booking: BookingConfig {
                horizon_days,
                daily_limit,
                auto_confirm,
            },
            app: AppConfig { name, environment },
        })
    }

    #[allow(unused)]
    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

// Use once_cell for a global config instance that's initialized once
use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}
