use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const CONGRESSIONAL_TRADES: &str = "congressional_trades";
pub const INSTITUTIONAL_TRADES: &str = "institutional_trades";
pub const FEDERAL_CONTRACTS: &str = "federal_contracts";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{table} returned {status}: {body}")]
    Status {
        table: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {table} rows: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A read query against one table, rendered as PostgREST query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), format!("gte.{}", value.to_string())));
        self
    }

    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let joined = values.iter().map(|v| v.as_ref()).collect::<Vec<_>>().join(",");
        self.filters.push((column.to_string(), format!("in.({})", joined)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, rows: usize) -> Self {
        self.limit = Some(rows);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filters.iter().cloned());
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", column, direction)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(query.table()))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("[Supabase] Query on {} failed: {} - {}", query.table(), status, body);
            return Err(StoreError::Status {
                table: query.table().to_string(),
                status,
                body,
            });
        }

        let bytes = response.bytes().await?;
        let rows: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            table: query.table().to_string(),
            source,
        })?;

        debug!("[Supabase] {} -> {} rows", query.table(), rows.len());
        Ok(rows)
    }
}
