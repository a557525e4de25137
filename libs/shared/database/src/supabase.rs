use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin PostgREST client for the hosted clinic tables.
///
/// The anon project key is sent both as `apikey` and as the bearer token,
/// which is what the hosted store expects from an unauthenticated site.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.anon_key))?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where T: DeserializeOwned {
        let response = self.send(method, path, body, extra_headers).await?;

        let data = response.json::<T>().await?;
        Ok(data)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);
            return Err(anyhow!(store_error_message(&error_text, status.as_u16())));
        }

        Ok(response)
    }

    /// Inserts a single row without reading it back, for tables the anon
    /// role may write but not select.
    pub async fn insert<R>(&self, table: &str, row: &R) -> Result<()>
    where R: Serialize {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let body = serde_json::to_value(vec![row])?;
        self.send(
            Method::POST,
            &format!("/rest/v1/{}", table),
            Some(body),
            Some(headers),
        ).await?;

        Ok(())
    }

    /// Inserts a single row and returns the stored representation.
    pub async fn insert_returning<R, T>(&self, table: &str, row: &R) -> Result<T>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let body = serde_json::to_value(vec![row])?;
        let mut rows: Vec<T> = self.request_with_headers(
            Method::POST,
            &format!("/rest/v1/{}", table),
            Some(body),
            Some(headers),
        ).await?;

        if rows.is_empty() {
            return Err(anyhow!("Insert into {} returned no rows", table));
        }

        Ok(rows.remove(0))
    }

    /// Selects every column of `table`, ordered by `order_column`.
    pub async fn select_ordered<T>(&self, table: &str, order_column: &str, ascending: bool) -> Result<Vec<T>>
    where T: DeserializeOwned {
        let direction = if ascending { "asc" } else { "desc" };
        let path = format!("/rest/v1/{}?select=*&order={}.{}", table, order_column, direction);

        self.request(Method::GET, &path, None).await
    }
}

/// PostgREST error bodies are JSON objects with a `message`; surface that
/// verbatim and fall back to the raw body.
fn store_error_message(body: &str, status: u16) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string));

    match message {
        Some(message) if !message.is_empty() => message,
        _ if body.trim().is_empty() => format!("Request failed with status {}", status),
        _ => body.to_string(),
    }
}
