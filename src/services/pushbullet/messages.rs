//! Pushbullet v2 REST payloads

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct UploadRequest<'a> {
    pub file_name: &'a str,
    pub file_type: &'a str,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub upload_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PushRequest {
    Note {
        title: String,
        body: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_tag: Option<String>,
    },
    File {
        file_name: String,
        file_type: String,
        file_url: String,
        body: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_tag: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Channel {
    pub iden: String,
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelList {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Push {
    pub iden: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PushList {
    #[serde(default)]
    pub pushes: Vec<Push>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
