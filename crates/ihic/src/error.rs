use crate::config::ConfigError;
use crate::expiry::DateError;
use crate::inventory::InventoryImportError;
use crate::site::SiteError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Inventory(InventoryImportError),
    Site(SiteError),
    Date(DateError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Inventory(err) => write!(f, "inventory error: {}", err),
            AppError::Site(err) => write!(f, "site generation error: {}", err),
            AppError::Date(err) => write!(f, "date error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Inventory(err) => Some(err),
            AppError::Site(err) => Some(err),
            AppError::Date(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Inventory(_) | AppError::Date(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Site(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self.response_body())).into_response()
    }
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Telemetry(_) => "telemetry",
            AppError::Io(_) => "io",
            AppError::Server(_) => "server",
            AppError::Inventory(_) => "inventory",
            AppError::Site(_) => "site",
            AppError::Date(_) => "date",
        }
    }

    /// JSON error payload; date errors echo the rejected cell text.
    fn response_body(&self) -> serde_json::Value {
        let mut body = json!({ "error": self.to_string(), "kind": self.kind() });
        if let AppError::Date(DateError::Malformed { raw }) = self {
            body["value"] = json!(raw);
        }
        if let AppError::Inventory(InventoryImportError::Csv(err)) = self {
            if let Some(line) = err.position().map(|pos| pos.line()) {
                body["line"] = json!(line);
            }
        }
        body
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<InventoryImportError> for AppError {
    fn from(value: InventoryImportError) -> Self {
        Self::Inventory(value)
    }
}

impl From<SiteError> for AppError {
    fn from(value: SiteError) -> Self {
        Self::Site(value)
    }
}

impl From<DateError> for AppError {
    fn from(value: DateError) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_errors_map_to_bad_request() {
        let response = AppError::from(DateError::Malformed {
            raw: "soon".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_dates_echo_the_rejected_value() {
        let body = AppError::from(DateError::Malformed {
            raw: "31/02/2025".to_string(),
        })
        .response_body();
        assert_eq!(body["kind"], "date");
        assert_eq!(body["value"], "31/02/2025");
        assert_eq!(body["error"], "date error: unrecognised date '31/02/2025'");

        let empty = AppError::from(DateError::Empty).response_body();
        assert_eq!(empty["kind"], "date");
        assert!(empty.get("value").is_none());
    }

    #[test]
    fn csv_errors_report_the_failing_line() {
        let mut reader = csv::ReaderBuilder::new().from_reader("a,b\n1,2,3\n".as_bytes());
        let err = reader
            .records()
            .next()
            .expect("one record")
            .expect_err("unequal row length");

        let body = AppError::from(InventoryImportError::from(err)).response_body();
        assert_eq!(body["kind"], "inventory");
        assert_eq!(body["line"], 2);
    }

    #[test]
    fn io_errors_map_to_internal_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
