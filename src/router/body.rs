//! # Parsing del Body POST
//! src/router/body.rs
//!
//! Interpreta el body según el `Content-Type` declarado:
//!
//! | Content-Type contiene               | Resultado                     |
//! |-------------------------------------|-------------------------------|
//! | `application/json`                  | documento JSON parseado       |
//! | `application/x-www-form-urlencoded` | objeto `{campo: "valor"}`     |
//! | cualquier otro (o ausente)          | `{"data": "<body crudo>"}`    |
//!
//! Solo el caso JSON puede fallar.

use crate::http::{QueryParams, Request};
use serde_json::{json, Value};
use thiserror::Error;

/// Body que no se pudo interpretar
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Tipo de contenido declarado por el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Form,
    Raw,
}

impl ContentKind {
    /// Clasifica un valor de `Content-Type` por contención
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("application/json") {
            ContentKind::Json
        } else if content_type.contains("application/x-www-form-urlencoded") {
            ContentKind::Form
        } else {
            ContentKind::Raw
        }
    }
}

/// Parsea el body del request según su `Content-Type`
pub fn parse_body(request: &Request) -> Result<Value, BodyError> {
    let body = request.body();

    match ContentKind::from_content_type(request.content_type()) {
        ContentKind::Json => Ok(serde_json::from_str(body)?),
        ContentKind::Form => Ok(QueryParams::parse(body).to_json()),
        ContentKind::Raw => Ok(json!({ "data": body })),
    }
}
