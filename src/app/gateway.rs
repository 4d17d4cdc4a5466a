//! Record Gateway: the single point of contact with the `/api/clientes/` service.
//!
//! Every call is one HTTP request, with no retries and no caching. Failures are
//! classified into three layers:
//! 1.  transport: the request produced no usable response (connect, timeout, undecodable body)
//! 2.  protocol: the service answered with a non-2xx status
//! 3.  service: a 2xx answer whose envelope says `success: false`

use crate::domain::cliente::ClienteRecord;
use crate::domain::envelope::{ClienteListResponse, ClienteResponse, Envelope};
use crate::error::{DirectoryError, FieldErrors, Result};
use crate::infra::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const CLIENTES_PATH: &str = "api/clientes/";
const SEARCH_PATH: &str = "api/clientes/buscar_por_documento/";

/// Typed access to the remote CRUD + search endpoints.
///
/// Implementations must not retry or cache; the directory layer relies on each
/// call reflecting exactly one round trip.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// `GET /api/clientes/`
    async fn list(&self) -> Result<Vec<ClienteRecord>>;

    /// `GET /api/clientes/{id}/`; [`DirectoryError::NotFound`] when no record matches.
    async fn get(&self, id: i64) -> Result<ClienteRecord>;

    /// `POST /api/clientes/`; any `id` on the input is dropped.
    async fn create(&self, record: &ClienteRecord) -> Result<ClienteRecord>;

    /// `PUT /api/clientes/{id}/`; full replace, `id` overrides the body's.
    async fn update(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord>;

    /// `PATCH /api/clientes/{id}/`
    async fn patch(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord>;

    /// `DELETE /api/clientes/{id}/`
    async fn delete(&self, id: i64) -> Result<()>;

    /// `GET /api/clientes/buscar_por_documento/?tipo=`; `tipo` is sent upper-cased.
    async fn search_by_document_type(&self, tipo: &str) -> Result<Vec<ClienteRecord>>;
}

/// Whatever part of an envelope an error body carries.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// [`RecordGateway`] over HTTP via reqwest.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DirectoryError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Self::with_client(client, &config.base_url)
    }

    /// Uses a preconfigured client (shared pools, custom TLS, tests).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DirectoryError::InvalidArgument(format!("invalid path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "clientes request");
        Ok(self.client.request(method, url))
    }

    /// Sends `request` and unwraps its envelope, classifying failures by layer.
    async fn exchange<E>(&self, request: RequestBuilder) -> Result<Option<E::Data>>
    where
        E: Envelope + DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "clientes request failed before a response");
            DirectoryError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = protocol_error(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "clientes request rejected");
            return Err(err);
        }

        let envelope: E = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "undecodable clientes response");
            DirectoryError::Transport(format!("respuesta inválida: {}", e))
        })?;
        if !envelope.success() {
            tracing::warn!(message = ?envelope.message(), "clientes service reported failure");
        }
        envelope.into_result()
    }

    async fn exchange_record(&self, request: RequestBuilder) -> Result<ClienteRecord> {
        self.exchange::<ClienteResponse>(request)
            .await?
            .ok_or_else(|| DirectoryError::service(Some("La respuesta no contiene el cliente".into()), None))
    }
}

#[async_trait]
impl RecordGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<ClienteRecord>> {
        let request = self.request(Method::GET, CLIENTES_PATH)?;
        let records = self.exchange::<ClienteListResponse>(request).await?;
        Ok(records.unwrap_or_default())
    }

    async fn get(&self, id: i64) -> Result<ClienteRecord> {
        let request = self.request(Method::GET, &record_path(id))?;
        match self.exchange::<ClienteResponse>(request).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(DirectoryError::NotFound(id)),
            Err(DirectoryError::Protocol { status: 404, .. }) => Err(DirectoryError::NotFound(id)),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, record: &ClienteRecord) -> Result<ClienteRecord> {
        let body = ClienteRecord {
            id: None,
            ..record.clone()
        };
        let request = self.request(Method::POST, CLIENTES_PATH)?.json(&body);
        self.exchange_record(request).await
    }

    async fn update(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        let body = record.clone().with_id(id);
        let request = self.request(Method::PUT, &record_path(id))?.json(&body);
        self.exchange_record(request).await
    }

    async fn patch(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        let body = record.clone().with_id(id);
        let request = self.request(Method::PATCH, &record_path(id))?.json(&body);
        self.exchange_record(request).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &record_path(id))?;
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let err = protocol_error(status, &body);
            tracing::warn!(id, status = status.as_u16(), error = %err, "delete rejected");
            return Err(err);
        }
        // 204 and empty bodies count as success.
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(());
        }
        let envelope: ClienteResponse = serde_json::from_str(&body)
            .map_err(|e| DirectoryError::Transport(format!("respuesta inválida: {}", e)))?;
        envelope.into_result().map(|_| ())
    }

    async fn search_by_document_type(&self, tipo: &str) -> Result<Vec<ClienteRecord>> {
        let tipo = tipo.trim().to_uppercase();
        let request = self
            .request(Method::GET, SEARCH_PATH)?
            .query(&[("tipo", tipo.as_str())]);
        let records = self.exchange::<ClienteListResponse>(request).await?;
        Ok(records.unwrap_or_default())
    }
}

fn record_path(id: i64) -> String {
    format!("{}{}/", CLIENTES_PATH, id)
}

/// Parses `base` and guarantees a trailing `/` so relative joins keep its path.
fn normalize_base_url(base: &str) -> Result<Url> {
    let trimmed = base.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash)
        .map_err(|e| DirectoryError::InvalidArgument(format!("invalid base URL '{}': {}", base, e)))
}

/// Builds the protocol-layer error, preferring the server's own message.
fn protocol_error(status: StatusCode, body: &str) -> DirectoryError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.detail)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "HTTP error".to_string());
    DirectoryError::Protocol {
        status: status.as_u16(),
        message,
        errors: parsed.errors,
    }
}
