//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Tabla fija de códigos de estado y sus reason phrases.
//!
//! - **2xx**: Éxito (200 OK, 201 Created)
//! - **4xx**: Error del cliente (400, 404, 405)
//! - **5xx**: Error del servidor (500, definido pero no emitido hoy)
//!
//! A diferencia de un enum cerrado, cualquier `u16` es un código válido:
//! los que no están en la tabla se serializan con la frase `Unknown`.

/// Código de estado HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK - La petición fue exitosa
    pub const OK: StatusCode = StatusCode(200);

    /// 201 Created - Se creó un recurso
    pub const CREATED: StatusCode = StatusCode(201);

    /// 400 Bad Request - Request o body malformado
    pub const BAD_REQUEST: StatusCode = StatusCode(400);

    /// 404 Not Found - Ruta no registrada
    pub const NOT_FOUND: StatusCode = StatusCode(404);

    /// 405 Method Not Allowed - Método distinto de GET/POST
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);

    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Crea un código a partir de su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), StatusCode::NOT_FOUND);
    /// ```
    pub const fn from_u16(code: u16) -> Self {
        StatusCode(code)
    }

    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::StatusCode;
    /// assert_eq!(StatusCode::OK.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// Los códigos fuera de la tabla retornan `"Unknown"`; el servidor
    /// nunca falla por un código no mapeado.
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::StatusCode;
    /// assert_eq!(StatusCode::NOT_FOUND.reason_phrase(), "Not Found");
    /// assert_eq!(StatusCode::from_u16(418).reason_phrase(), "Unknown");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}
