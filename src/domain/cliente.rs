//! The customer record exchanged with the `/api/clientes/` service.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Document type carried by a cliente.
///
/// Travels as a plain string on the wire; anything that is not DNI or RUC is
/// kept verbatim so records from newer servers still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TipoDocumento {
    Dni,
    Ruc,
    Other(String),
}

impl TipoDocumento {
    pub fn as_str(&self) -> &str {
        match self {
            TipoDocumento::Dni => "DNI",
            TipoDocumento::Ruc => "RUC",
            TipoDocumento::Other(s) => s.as_str(),
        }
    }

    /// Case-insensitive containment, e.g. `"dni-extranjero"` contains `"DNI"`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.as_str().to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Only the exact spellings `DNI` and `RUC` map to the named variants; any
/// other value (`"dni"` included) is kept verbatim so it serializes back unchanged.
impl From<String> for TipoDocumento {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DNI" => TipoDocumento::Dni,
            "RUC" => TipoDocumento::Ruc,
            _ => TipoDocumento::Other(value),
        }
    }
}

impl From<&str> for TipoDocumento {
    fn from(value: &str) -> Self {
        TipoDocumento::from(value.to_string())
    }
}

impl From<TipoDocumento> for String {
    fn from(value: TipoDocumento) -> Self {
        match value {
            TipoDocumento::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Blank, so a record built from defaults fails validation on this field.
impl Default for TipoDocumento {
    fn default() -> Self {
        TipoDocumento::Other(String::new())
    }
}

impl fmt::Display for TipoDocumento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire names of the six required scalar fields, in form order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "nombre",
    "apellido",
    "telefono",
    "email",
    "tipo_documento",
    "numero_documento",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ClienteRecord {
    /// Server-assigned identity; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[schema(value_type = String, example = "DNI")]
    pub tipo_documento: TipoDocumento,
    #[serde(default)]
    pub numero_documento: String,
}

impl ClienteRecord {
    pub fn new(
        nombre: impl Into<String>,
        apellido: impl Into<String>,
        telefono: impl Into<String>,
        email: impl Into<String>,
        tipo_documento: impl Into<TipoDocumento>,
        numero_documento: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            nombre: nombre.into(),
            apellido: apellido.into(),
            telefono: telefono.into(),
            email: email.into(),
            tipo_documento: tipo_documento.into(),
            numero_documento: numero_documento.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// `nombre apellido`, the string the name search matches against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    /// Value of a required field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "nombre" => Some(&self.nombre),
            "apellido" => Some(&self.apellido),
            "telefono" => Some(&self.telefono),
            "email" => Some(&self.email),
            "tipo_documento" => Some(self.tipo_documento.as_str()),
            "numero_documento" => Some(&self.numero_documento),
            _ => None,
        }
    }

    /// Sets a required field by its wire name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let value = value.to_string();
        match name {
            "nombre" => self.nombre = value,
            "apellido" => self.apellido = value,
            "telefono" => self.telefono = value,
            "email" => self.email = value,
            "tipo_documento" => self.tipo_documento = TipoDocumento::from(value),
            "numero_documento" => self.numero_documento = value,
            _ => return false,
        }
        true
    }

    /// Required fields that are empty after trimming, in form order.
    pub fn blank_fields(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|name| self.field(name).map_or(true, |v| v.trim().is_empty()))
            .map(|name| name.to_string())
            .collect()
    }

    /// Copies every non-blank field of `patch` over `self`. Identity is left alone.
    pub fn merge_non_blank(&mut self, patch: &ClienteRecord) {
        for name in REQUIRED_FIELDS {
            if let Some(value) = patch.field(name) {
                if !value.trim().is_empty() {
                    self.set_field(name, value);
                }
            }
        }
    }
}

impl fmt::Display for ClienteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        write!(
            f,
            "{} - {}: {} - ID: {}",
            self.full_name(),
            self.tipo_documento,
            self.numero_documento,
            id
        )
    }
}
