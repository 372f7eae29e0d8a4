//! Request/response surface for front ends.
//!
//! Requests and responses are plain serde types so a front end can drive the
//! core over JSON:
//!
//! ```json
//! {"op": "read", "filename": "1704067200000.diary", "password": "pw123"}
//! {"success": true, "text": "Hello world"}
//! ```
//!
//! [`dispatch`] never fails: every error becomes a tagged failure response
//! carrying a stable code (`not_found`, `auth_failed`, `storage`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::DiaryError;
use crate::storage::{EntryDescriptor, EntryStore};

/// A password carried inside a request. Zeroized on drop, redacted in `Debug`.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Password::new)
    }
}

/// One operation against the entry store.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    List,
    Create {
        title: String,
        text: String,
        password: Password,
    },
    Read {
        filename: String,
        password: Password,
    },
    Update {
        filename: String,
        new_title: String,
        new_text: String,
        password: Password,
    },
    Delete {
        filename: String,
    },
}

impl Request {
    pub fn op(&self) -> &'static str {
        match self {
            Request::List => "list",
            Request::Create { .. } => "create",
            Request::Read { .. } => "read",
            Request::Update { .. } => "update",
            Request::Delete { .. } => "delete",
        }
    }
}

/// Result of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<EntryDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<EntryDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Stable failure code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Human-readable failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<EntryDescriptor>) -> Self {
        Self {
            entries: Some(entries),
            ..Self::ok()
        }
    }

    pub fn with_descriptor(descriptor: EntryDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            ..Self::ok()
        }
    }

    pub fn with_text(text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::ok()
        }
    }

    pub fn failure(err: &DiaryError) -> Self {
        Self {
            success: false,
            error: Some(err.code().to_string()),
            message: Some(err.to_string()),
            ..Self::default()
        }
    }
}

/// Run `request` against `store`.
pub fn dispatch<S: EntryStore + ?Sized>(store: &S, request: Request) -> Response {
    let op = request.op();
    let result = match request {
        Request::List => store.list().map(Response::with_entries),
        Request::Create {
            title,
            text,
            password,
        } => store
            .create(&title, &text, password.expose())
            .map(Response::with_descriptor),
        Request::Read { filename, password } => store
            .read(&filename, password.expose())
            .map(Response::with_text),
        Request::Update {
            filename,
            new_title,
            new_text,
            password,
        } => store
            .update(&filename, &new_title, &new_text, password.expose())
            .map(|_| Response::ok()),
        Request::Delete { filename } => store.delete(&filename).map(|_| Response::ok()),
    };

    result.unwrap_or_else(|err| {
        debug!(op, code = err.code(), "Request failed");
        Response::failure(&err)
    })
}

/// Handle one JSON-encoded request and return the JSON-encoded response.
///
/// A line that does not parse as a request yields an `invalid_input`
/// failure.
pub fn dispatch_json<S: EntryStore + ?Sized>(store: &S, line: &str) -> String {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(store, request),
        Err(e) => Response::failure(&DiaryError::InvalidInput(e.to_string())),
    };
    // Response only holds strings, integers and timestamps.
    serde_json::to_string(&response).unwrap_or_else(|_| {
        r#"{"success":false,"error":"storage","message":"Failed to encode response"}"#.to_string()
    })
}
