//! # Query Parameters
//! src/http/query.rs
//!
//! Parsing de pares `key=value&key2=value2`, usado tanto para la query
//! string de un GET como para bodies `application/x-www-form-urlencoded`.
//!
//! Reglas:
//! - Se separa por `&`, luego cada par por el PRIMER `=`
//! - Keys y values se decodifican (percent-decoding)
//! - Un par sin key (`=x` o vacío) se descarta
//! - Un par sin `=` (`?debug`) queda con value vacío
//! - Si una key se repite, gana la última

use std::collections::HashMap;

/// Parámetros decodificados de una query string o formulario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parsea una query string (sin el `?` inicial)
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::QueryParams;
    ///
    /// let query = QueryParams::parse("name=John%20Doe&age=30");
    /// assert_eq!(query.get("name"), Some("John Doe"));
    /// assert_eq!(query.get("age"), Some("30"));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut params = HashMap::new();

        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };

            if key.is_empty() {
                continue;
            }

            params.insert(percent_decode(key), percent_decode(value));
        }

        Self { params }
    }

    /// Obtiene un parámetro específico
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Itera sobre los pares (orden no especificado)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convierte los parámetros a un objeto JSON de strings
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Decodifica secuencias `%XX`
///
/// Si el resultado decodificado no es UTF-8 válido se conserva el texto
/// original sin decodificar. `+` NO se convierte en espacio.
pub fn percent_decode(s: &str) -> String {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}
