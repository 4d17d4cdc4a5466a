//! The `{success, message, data, errors}` wrapper around every service response.

use crate::domain::cliente::ClienteRecord;
use crate::error::{DirectoryError, FieldErrors, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope carrying a single record (get, create, update, patch, delete).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClienteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ClienteRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

/// Envelope carrying a sequence of records (list, server-side search).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClienteListResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<ClienteRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

/// Common view over both envelope shapes so the gateway can unwrap them uniformly.
pub trait Envelope {
    type Data;

    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;

    /// Splits a successful envelope into its payload, or turns a failed one into
    /// [`DirectoryError::Service`] with the server message passed through.
    fn into_result(self) -> Result<Option<Self::Data>>;
}

impl Envelope for ClienteResponse {
    type Data = ClienteRecord;

    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn into_result(self) -> Result<Option<ClienteRecord>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(DirectoryError::service(self.message, self.errors))
        }
    }
}

impl Envelope for ClienteListResponse {
    type Data = Vec<ClienteRecord>;

    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn into_result(self) -> Result<Option<Vec<ClienteRecord>>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(DirectoryError::service(self.message, self.errors))
        }
    }
}

impl ClienteResponse {
    pub fn ok(message: impl Into<String>, data: Option<ClienteRecord>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}

impl ClienteListResponse {
    pub fn ok(message: impl Into<String>, data: Vec<ClienteRecord>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: Some(data.len()),
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn list_envelope_tolerates_missing_optional_fields() {
        let env: ClienteListResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(env.into_result().unwrap(), None);
    }

    #[test]
    fn failed_envelope_becomes_service_error_with_field_errors() {
        let env: ClienteResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Datos inválidos",
            "data": null,
            "errors": { "email": ["Este campo es requerido."] }
        }))
        .unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.to_string(), "Datos inválidos");
        assert_eq!(err.field_errors().unwrap()["email"], vec!["Este campo es requerido."]);
    }
}
