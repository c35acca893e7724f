use crate::contracts::DEFAULT_WATCHLIST;
use std::ops::RangeInclusive;

/// Lookback windows longer than ten years are rejected.
pub const LOOKBACK_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} required")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub port: u16,
    pub lookback_days: i64,
    pub contract_limit: usize,
    pub watchlist: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase_url = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_key = get("SUPABASE_ANON_KEY")
            .or_else(|| get("SUPABASE_SERVICE_ROLE_KEY"))
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let port = parse_or("PORT", get("PORT"), 3000u16)?;
        let lookback_days = parse_or("LOOKBACK_DAYS", get("LOOKBACK_DAYS"), 30i64)?;
        if !LOOKBACK_DAYS_RANGE.contains(&lookback_days) {
            return Err(ConfigError::Invalid {
                key: "LOOKBACK_DAYS",
                value: lookback_days.to_string(),
            });
        }
        let contract_limit = parse_or("CONTRACT_LIMIT", get("CONTRACT_LIMIT"), 10usize)?;

        let watchlist = match get("TICKER_WATCHLIST") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_WATCHLIST.clone(),
        };

        Ok(Self {
            supabase_url,
            supabase_key,
            port,
            lookback_days,
            contract_limit,
            watchlist,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
