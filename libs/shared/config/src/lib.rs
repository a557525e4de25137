use std::env;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub clinic_timezone: Tz,
    pub slot_interval_minutes: u32,
    pub closed_dates: Vec<NaiveDate>,
    pub review_platform_url: Option<String>,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            clinic_timezone: chrono_tz::Asia::Kolkata,
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            closed_dates: Vec::new(),
            review_platform_url: None,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
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
            clinic_timezone: env::var("CLINIC_TIMEZONE")
                .ok()
                .and_then(|raw| match Tz::from_str(&raw) {
                    Ok(tz) => Some(tz),
                    Err(_) => {
                        warn!("CLINIC_TIMEZONE '{}' is not a valid IANA zone, using {}", raw, DEFAULT_TIMEZONE);
                        None
                    }
                })
                .unwrap_or(chrono_tz::Asia::Kolkata),
            slot_interval_minutes: env::var("SLOT_INTERVAL_MINUTES")
                .ok()
                .and_then(|raw| match raw.parse::<u32>() {
                    Ok(minutes) if minutes > 0 => Some(minutes),
                    _ => {
                        warn!("SLOT_INTERVAL_MINUTES '{}' is invalid, using default", raw);
                        None
                    }
                })
                .unwrap_or(DEFAULT_SLOT_INTERVAL_MINUTES),
            closed_dates: env::var("CLINIC_CLOSED_DATES")
                .map(|raw| parse_closed_dates(&raw))
                .unwrap_or_default(),
            review_platform_url: env::var("REVIEW_PLATFORM_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    /// Wall-clock time at the clinic, without zone information.
    pub fn clinic_now(&self) -> NaiveDateTime {
        self.clinic_local(Utc::now())
    }

    pub fn clinic_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.clinic_timezone).naive_local()
    }
}

/// Parses a comma separated list of `YYYY-MM-DD` dates, skipping bad entries.
pub fn parse_closed_dates(raw: &str) -> Vec<NaiveDate> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match NaiveDate::parse_from_str(entry, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                warn!("Ignoring invalid closed date '{}'", entry);
                None
            }
        })
        .collect()
}
