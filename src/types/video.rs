use crate::client::MultipartForm;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Transcription state reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Processing,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

impl VideoStatus {
    /// True once the backend will not change the status on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: VideoStatus,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// New video for `upload_video`.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl VideoUpload {
    pub fn new(
        title: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub(crate) fn into_form(self) -> MultipartForm {
        let mut form = MultipartForm::new().text("title", self.title);
        if let Some(description) = self.description {
            form = form.text("description", description);
        }
        match self.content_type {
            Some(mime) => form.file_with_mime("file", self.file_name, mime, self.data),
            None => form.file("file", self.file_name, self.data),
        }
    }
}

/// Partial update; `None` fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FormPart;

    #[test]
    fn unknown_status_is_tolerated() {
        let video: Video = serde_json::from_str(
            r#"{"id":1,"title":"Intro","status":"indexing","uploaded_at":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(video.status, VideoStatus::Unknown);
        assert!(video.description.is_none());
        assert!(!video.status.is_terminal());
    }

    #[test]
    fn upload_form_fields() {
        let form = VideoUpload::new("Intro", "intro.mp4", vec![0u8; 4])
            .with_description("First lecture")
            .into_form();
        let names: Vec<&str> = form
            .parts()
            .iter()
            .map(|p| match p {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, vec!["title", "description", "file"]);
    }

    #[test]
    fn update_skips_unset_fields() {
        let update = VideoUpdate {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"title": "Renamed"})
        );
    }
}
