use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use maud::html;
use std::fmt;

/// Status the inference backend uses when it has no API key configured.
pub const ASSIST_UNCONFIGURED_STATUS: u16 = 503;

#[derive(Debug)]
pub enum ConsoleError {
    /// The request never produced a response (connection refused, reset, timeout).
    Transport(String),
    /// The backend answered with a non-success status and an error message.
    Backend { status: u16, message: String },
    NotFound(String),
    /// AI-assisted search, scan or lookup failed.
    Assist { status: Option<u16>, message: String },
    /// The backend answered but the body was not what we expected.
    Decode(String),
    BadRequest(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConsoleError::Transport(msg) => write!(f, "Network error: {}", msg),
            ConsoleError::Backend { message, .. } => write!(f, "{}", message),
            ConsoleError::NotFound(msg) => write!(f, "{}", msg),
            ConsoleError::Assist { message, .. } => write!(f, "{}", message),
            ConsoleError::Decode(msg) => write!(f, "Unexpected response from backend: {}", msg),
            ConsoleError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl ConsoleError {
    pub fn not_found(entity: &str) -> Self {
        ConsoleError::NotFound(format!("{} not found", entity))
    }

    pub fn assist(status: Option<u16>, message: impl Into<String>) -> Self {
        ConsoleError::Assist { status, message: message.into() }
    }

    /// Extra guidance shown next to the message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConsoleError::Assist { status: Some(ASSIST_UNCONFIGURED_STATUS), .. } => {
                Some("Please check your GEMINI_API_KEY environment variable.")
            }
            ConsoleError::Transport(_) => Some("Is the inventory backend running?"),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConsoleError::Decode(err.to_string())
        } else {
            ConsoleError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Decode(err.to_string())
    }
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsoleError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ConsoleError::Backend { status, .. } if (400..500).contains(status) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ConsoleError::Assist { status: Some(ASSIST_UNCONFIGURED_STATUS), .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = html! {
            div class="alert alert-danger m-4" role="alert" {
                i class="fa-solid fa-circle-exclamation me-2" {}
                (self.to_string())
                @if let Some(hint) = self.hint() {
                    br;
                    small { (hint) }
                }
            }
        };

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(body.into_string())
    }
}
