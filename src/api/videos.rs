use super::VIDEOS_PATH;
use crate::client::{ApiClient, ApiRequest};
use crate::types::{Video, VideoUpdate, VideoUpload};
use crate::Result;

fn video_path(id: i64) -> String {
    format!("{}{}/", VIDEOS_PATH, id)
}

impl ApiClient {
    pub async fn list_videos(&self) -> Result<Vec<Video>> {
        self.get(VIDEOS_PATH).await
    }

    pub async fn get_video(&self, id: i64) -> Result<Video> {
        self.get(&video_path(id)).await
    }

    /// Uploads a video as `multipart/form-data` (`title`, `description`, `file`).
    pub async fn upload_video(&self, upload: VideoUpload) -> Result<Video> {
        self.request(ApiRequest::post(VIDEOS_PATH).multipart(upload.into_form()))
            .await
    }

    pub async fn update_video(&self, id: i64, update: &VideoUpdate) -> Result<Video> {
        self.patch(&video_path(id), update).await
    }

    pub async fn delete_video(&self, id: i64) -> Result<()> {
        self.request_json(ApiRequest::delete(video_path(id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_path_has_trailing_slash() {
        assert_eq!(video_path(42), "/videos/42/");
    }
}
