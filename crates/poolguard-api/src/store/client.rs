// Table store HTTP client
//
// Wraps `reqwest::Client` with PostgREST URL construction, key headers,
// row filters, and error-body parsing. Table endpoints (inventory,
// schedule, etc.) are implemented as inherent methods in separate files
// to keep this module focused on transport mechanics.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, body_preview};

const REST_PREFIX: &str = "rest/v1";
const PREFER_REPRESENTATION: &str = "return=representation";
const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=minimal";

// ── Error response shape from the store ─────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for a PostgREST-compatible table store.
///
/// Every request carries the project key twice, as `apikey` and as a
/// bearer token, which is what hosted Supabase projects expect. All
/// table paths resolve under `{base}/rest/v1/`.
pub struct TableClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TableClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a project URL, key, and transport config.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let key = api_key.expose_secret();
        let mut headers = HeaderMap::new();

        let mut key_value = HeaderValue::from_str(key).map_err(|e| Error::Authentication {
            message: format!("invalid API key header value: {e}"),
        })?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Append `/rest/v1/` unless the caller already pointed at it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(REST_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/{REST_PREFIX}/"));
        }

        Ok(url)
    }

    /// The resolved REST root (always ends in `/rest/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn table_url(&self, table: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(table)?)
    }

    /// PostgREST equality filter on the `id` column.
    fn id_filter(id: &str) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET /{table}?{params}` returning every matching row.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.table_url(table)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    /// `POST /{table}` returning the inserted rows.
    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, Error> {
        let url = self.table_url(table)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// `POST /{table}` merging on the primary key.
    pub(crate) async fn upsert<B: Serialize + Sync>(&self, table: &str, body: &B) -> Result<(), Error> {
        let url = self.table_url(table)?;
        debug!("POST {url} (upsert)");

        let resp = self
            .http
            .post(url)
            .header("Prefer", PREFER_UPSERT)
            .json(body)
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    /// `PATCH /{table}?id=eq.{id}`.
    pub(crate) async fn update<B: Serialize + Sync>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.table_url(table)?;
        debug!("PATCH {url} id={id}");

        let resp = self
            .http
            .patch(url)
            .query(&Self::id_filter(id))
            .header("Prefer", PREFER_MINIMAL)
            .json(body)
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    /// `DELETE /{table}?id=eq.{id}`.
    pub(crate) async fn delete(&self, table: &str, id: &str) -> Result<(), Error> {
        let url = self.table_url(table)?;
        debug!("DELETE {url} id={id}");

        let resp = self
            .http
            .delete(url)
            .query(&Self::id_filter(id))
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "store response body");
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::parse_error(status, resp).await)
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::Authentication {
                message: format!("store rejected the API key (HTTP {})", status.as_u16()),
            };
        }

        let body = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();
        let (message, code) = match parsed {
            Some(ErrorResponse {
                message: Some(message),
                code,
            }) => (message, code),
            Some(ErrorResponse { code, .. }) => (status.to_string(), code),
            None => (
                format!("HTTP {status}: {}", body_preview(&body)),
                None,
            ),
        };

        Error::Store {
            message,
            code,
            status: status.as_u16(),
        }
    }
}
