//! Pushbullet client implementing the notification sink.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info};

use super::messages::{
    ApiErrorBody, Channel, ChannelList, PushList, PushRequest, UploadRequest, UploadResponse,
};
use crate::error::{Error, Result};
use crate::services::notifier::{InboxMessage, NotificationSink};

const IMAGE_FILE_TYPE: &str = "image/png";

pub struct PushbulletNotifier {
    base_url: String,
    token: String,
    http: Client,
    /// Symbol (upper case) to channel tag.
    channels: HashMap<String, String>,
}

impl PushbulletNotifier {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
        channels: HashMap<String, String>,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, token, http, channels))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        http: Client,
        channels: HashMap<String, String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http,
            channels: channels
                .into_iter()
                .map(|(symbol, tag)| (symbol.to_uppercase(), tag))
                .collect(),
        }
    }

    /// Channel tag configured for `symbol`, if any.
    pub fn channel_tag_for(&self, symbol: &str) -> Option<&str> {
        self.channels.get(&symbol.to_uppercase()).map(String::as_str)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Access-Token", &self.token)
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => err.error.message,
            Err(_) => body,
        };
        Err(Error::Notification(format!("{} failed with {}: {}", action, status, detail)))
    }

    /// Upload a PNG and return the file descriptor to attach to a push.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Notification(format!("invalid file name: {}", path.display())))?
            .to_string();

        let response = self
            .authorized(self.http.post(format!("{}/v2/upload-request", self.base_url)))
            .json(&UploadRequest {
                file_name: &file_name,
                file_type: IMAGE_FILE_TYPE,
            })
            .send()
            .await?;
        let upload: UploadResponse = Self::check(response, "upload request").await?.json().await?;

        let bytes = tokio::fs::read(path).await?;
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(IMAGE_FILE_TYPE)?;
        let response = self
            .http
            .post(&upload.upload_url)
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        Self::check(response, "file upload").await?;

        debug!(file = %file_name, url = %upload.file_url, "Uploaded chart image");
        Ok(upload)
    }

    /// Channels owned by the account.
    pub async fn channels(&self) -> Result<Vec<Channel>> {
        let response = self
            .authorized(self.http.get(format!("{}/v2/channels", self.base_url)))
            .send()
            .await?;
        let list: ChannelList = Self::check(response, "channel listing").await?.json().await?;
        Ok(list.channels)
    }

    pub async fn create_push(&self, push: &PushRequest) -> Result<()> {
        let response = self
            .authorized(self.http.post(format!("{}/v2/pushes", self.base_url)))
            .json(push)
            .send()
            .await?;
        Self::check(response, "push").await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationSink for PushbulletNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        image: Option<&Path>,
        symbol: Option<&str>,
    ) -> Result<()> {
        let upload = match image {
            Some(path) if path.exists() => Some(self.upload_file(path).await?),
            _ => None,
        };

        let channel_tag = match symbol.and_then(|s| self.channel_tag_for(s)) {
            Some(tag) => {
                let channels = self.channels().await?;
                if !channels.iter().any(|c| c.tag == tag) {
                    error!(
                        symbol = symbol.unwrap_or_default(),
                        channel = %tag,
                        "Channel {} not found, dropping push",
                        tag
                    );
                    return Ok(());
                }
                Some(tag.to_string())
            }
            None => None,
        };

        let push = match upload {
            Some(upload) => PushRequest::File {
                file_name: upload.file_name,
                file_type: upload.file_type,
                file_url: upload.file_url,
                body: message.to_string(),
                channel_tag: channel_tag.clone(),
            },
            None => PushRequest::Note {
                title: title.to_string(),
                body: message.to_string(),
                channel_tag: channel_tag.clone(),
            },
        };

        self.create_push(&push).await?;
        info!(
            title = %title,
            channel = channel_tag.as_deref().unwrap_or("inbox"),
            "Push sent"
        );
        Ok(())
    }

    async fn latest_message(&self) -> Result<Option<InboxMessage>> {
        let response = self
            .authorized(self.http.get(format!("{}/v2/pushes", self.base_url)))
            .query(&[("limit", "1"), ("active", "true")])
            .send()
            .await?;
        let list: PushList = Self::check(response, "push listing").await?.json().await?;

        Ok(list.pushes.into_iter().next().map(|push| InboxMessage {
            id: push.iden,
            body: push.body,
        }))
    }
}
