//! Payload types of the board-management REST collaborator.
//!
//! The whiteboard core never performs these requests; hosts that do share
//! these definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::records::BoardRecord;

/// Endpoints of the board-management service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEndpoint {
    Create,
    Delete(String),
    Restore(String),
    PermanentDelete(String),
}

impl BoardEndpoint {
    pub fn method(&self) -> &'static str {
        match self {
            BoardEndpoint::Create | BoardEndpoint::Restore(_) => "POST",
            BoardEndpoint::Delete(_) | BoardEndpoint::PermanentDelete(_) => "DELETE",
        }
    }

    pub fn path(&self) -> String {
        match self {
            BoardEndpoint::Create => "/api/boards/create".to_string(),
            BoardEndpoint::Delete(id) => format!("/api/boards/{}/delete", id),
            BoardEndpoint::Restore(id) => format!("/api/boards/{}/restore", id),
            BoardEndpoint::PermanentDelete(id) => format!("/api/boards/{}/permanent-delete", id),
        }
    }
}

/// Body of `POST /api/boards/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub content: String,
    pub thumbnail: String,
}

impl From<&BoardRecord> for CreateBoardRequest {
    fn from(record: &BoardRecord) -> Self {
        Self {
            title: record.name.clone(),
            content: record.data.clone(),
            thumbnail: record.data.clone(),
        }
    }
}

/// Response body shared by every board endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure reported by the board service.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("board service error: {0}")]
pub struct RemoteError(pub String);

impl BoardResponse {
    /// Converts the response into the redirect target on success.
    pub fn into_result(self) -> Result<Option<String>, RemoteError> {
        if self.success {
            Ok(self.redirect)
        } else {
            Err(RemoteError(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_method_and_path() {
        assert_eq!(BoardEndpoint::Create.method(), "POST");
        assert_eq!(BoardEndpoint::Create.path(), "/api/boards/create");
        let delete = BoardEndpoint::Delete("7".into());
        assert_eq!(delete.method(), "DELETE");
        assert_eq!(delete.path(), "/api/boards/7/delete");
        assert_eq!(
            BoardEndpoint::Restore("7".into()).path(),
            "/api/boards/7/restore"
        );
        assert_eq!(
            BoardEndpoint::PermanentDelete("7".into()).path(),
            "/api/boards/7/permanent-delete"
        );
    }

    #[test]
    fn create_response_success_and_failure() {
        let ok: BoardResponse =
            serde_json::from_str(r#"{"success": true, "redirect": "/board/3"}"#).unwrap();
        assert_eq!(ok.into_result(), Ok(Some("/board/3".to_string())));

        let failed: BoardResponse =
            serde_json::from_str(r#"{"success": false, "error": "Title taken"}"#).unwrap();
        assert_eq!(
            failed.into_result(),
            Err(RemoteError("Title taken".to_string()))
        );
    }

    #[test]
    fn create_request_is_built_from_record() {
        let record = BoardRecord {
            name: "Plan".into(),
            data: "data:image/png;base64,AA==".into(),
            timestamp: "2024-01-01T00:00:00.000Z".into(),
        };
        let request = CreateBoardRequest::from(&record);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "Plan");
        assert_eq!(json["content"], "data:image/png;base64,AA==");
        assert_eq!(json["thumbnail"], "data:image/png;base64,AA==");
    }
}
