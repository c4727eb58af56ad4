use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ResolverConfig;

/// Media resolved from a douyin short link.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMedia {
    Video {
        author: String,
        title: String,
        url: String,
    },
    ImageSet {
        author: String,
        title: String,
        images: Vec<String>,
    },
}

/// Turns a short link into resolved media. Implemented by the parse API
/// client; tests swap in a mock.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, link: &str) -> Result<ResolvedMedia>;
}

/// Wire format of the parse API. `type` is "视频" for a single video or
/// "图集" for an image set; `code` 1 means success.
#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "name", default)]
    author: String,
    #[serde(default)]
    video: String,
    #[serde(default)]
    images: Vec<String>,
}

impl ParseResponse {
    fn into_media(self) -> Result<ResolvedMedia> {
        if self.code != 1 {
            anyhow::bail!(
                "{}",
                self.msg.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        match self.kind.as_str() {
            "视频" if !self.video.is_empty() => Ok(ResolvedMedia::Video {
                author: self.author,
                title: self.title,
                url: self.video,
            }),
            "图集" if !self.images.is_empty() => Ok(ResolvedMedia::ImageSet {
                author: self.author,
                title: self.title,
                images: self.images,
            }),
            other => anyhow::bail!("unsupported content type: {}", other),
        }
    }
}

/// Client for the external link-resolution service.
pub struct ParseApiClient {
    client: reqwest::Client,
    config: ResolverConfig,
}

impl ParseApiClient {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LinkResolver for ParseApiClient {
    async fn resolve(&self, link: &str) -> Result<ResolvedMedia> {
        debug!("Requesting parse API for: {}", link);

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[("url", link)])
            .send()
            .await
            .context("Failed to reach parse API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Parse API error ({}): {}", status, error_body);
        }

        let parsed: ParseResponse = response
            .json()
            .await
            .context("Failed to decode parse API response")?;

        parsed.into_media()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ParseResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_video_response_maps_to_video() {
        let media = parse(
            r#"{
                "code": 1,
                "type": "视频",
                "title": "海边日落",
                "name": "小王",
                "video": "https://cdn.example.com/v.mp4"
            }"#,
        )
        .into_media()
        .unwrap();

        assert_eq!(
            media,
            ResolvedMedia::Video {
                author: "小王".to_string(),
                title: "海边日落".to_string(),
                url: "https://cdn.example.com/v.mp4".to_string(),
            }
        );
    }

    #[test]
    fn test_image_set_preserves_order() {
        let media = parse(
            r#"{
                "code": 1,
                "type": "图集",
                "title": "旅行照片",
                "name": "小李",
                "images": ["https://a/1.jpg", "https://a/2.jpg", "https://a/3.jpg"]
            }"#,
        )
        .into_media()
        .unwrap();

        match media {
            ResolvedMedia::ImageSet { images, .. } => {
                assert_eq!(
                    images,
                    vec!["https://a/1.jpg", "https://a/2.jpg", "https://a/3.jpg"]
                );
            }
            other => panic!("expected image set, got {:?}", other),
        }
    }

    #[test]
    fn test_error_code_carries_api_message() {
        let err = parse(r#"{"code": 0, "msg": "链接已失效"}"#)
            .into_media()
            .unwrap_err();
        assert_eq!(err.to_string(), "链接已失效");
    }

    #[test]
    fn test_error_code_without_message() {
        let err = parse(r#"{"code": -1}"#).into_media().unwrap_err();
        assert_eq!(err.to_string(), "unknown error");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = parse(r#"{"code": 1, "type": "直播", "name": "小张"}"#)
            .into_media()
            .unwrap_err();
        assert!(err.to_string().contains("unsupported content type"));
    }

    #[test]
    fn test_video_kind_with_empty_url_is_rejected() {
        let err = parse(r#"{"code": 1, "type": "视频", "name": "小张", "video": ""}"#)
            .into_media()
            .unwrap_err();
        assert!(err.to_string().contains("unsupported content type"));
    }

    #[test]
    fn test_image_kind_with_no_images_is_rejected() {
        let err = parse(r#"{"code": 1, "type": "图集", "name": "小张", "images": []}"#)
            .into_media()
            .unwrap_err();
        assert!(err.to_string().contains("unsupported content type"));
    }
}
