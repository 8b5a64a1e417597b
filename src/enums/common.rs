use serde::Serialize;
use utoipa::ToSchema;

/// Body of error responses and of endpoints that only acknowledge.
#[derive(Serialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
