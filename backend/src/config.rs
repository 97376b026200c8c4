use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr},
    str::FromStr,
};

use tracing::{info, warn};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tracker.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    /// Shared bearer token for mutating requests. Writes are open when unset.
    pub api_token: Option<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_token = lookup("API_TOKEN").filter(|t| !t.trim().is_empty());
        if api_token.is_none() {
            warn!("API_TOKEN not set, mutating routes accept unauthenticated requests");
        }

        Self {
            host: try_load(&lookup, "HOST", DEFAULT_HOST),
            port: try_load(&lookup, "PORT", DEFAULT_PORT),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                info!("DATABASE_URL not set, using default: {DEFAULT_DATABASE_URL}");
                DEFAULT_DATABASE_URL.to_string()
            }),
            api_token,
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
                default
            }
        },
    }
}
