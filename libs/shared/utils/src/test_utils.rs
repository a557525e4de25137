use std::sync::Arc;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub review_platform_url: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            review_platform_url: Some("https://g.page/r/test-clinic/review".to_string()),
        }
    }
}

impl TestConfig {
    pub fn with_store(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            review_platform_url: self.review_platform_url.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Builds a clinic-local moment, e.g. `at(2024, 1, 15, 21, 50)`.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test moment")
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn review_row(name: &str, rating: u8, comment: &str, date: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "rating": rating,
            "comment": comment,
            "date": date
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "code": "42501",
            "details": null,
            "hint": null,
            "message": message
        })
    }
}
