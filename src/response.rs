//! Response body helpers.

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn error_body(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: message.into(),
    }
}

/// Body returned after a successful delete, e.g. `{"message": "User deleted successfully"}`.
pub fn deleted_body(label: &str) -> MessageBody {
    MessageBody {
        message: format!("{} deleted successfully", label),
    }
}
