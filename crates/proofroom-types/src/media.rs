use crate::id::ProjectId;
use crate::notification::NoticeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Prefix used when minting record ids for this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// Notice emitted for the first upload of a project; later uploads all
    /// emit `new-version` regardless of kind.
    pub fn first_upload_notice(&self) -> NoticeKind {
        match self {
            MediaKind::Photo => NoticeKind::NewPhoto,
            MediaKind::Video => NoticeKind::NewVideo,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaStatus {
    UnderReview,
    Approved,
    NotApproved,
}

impl MediaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MediaStatus::UnderReview => "Under Review",
            MediaStatus::Approved => "Approved",
            MediaStatus::NotApproved => "Not Approved",
        }
    }
}

/// One uploaded photo or video, part of a project's append-only version
/// sequence. Immutable once created except for the review-status fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaVersion {
    pub id: String,
    pub project_id: ProjectId,
    pub kind: MediaKind,
    pub file_name: String,
    /// Locator only: a URL, path or storage reference. No bytes are stored.
    pub url: String,
    pub version: u32,
    pub uploaded_at: DateTime<Utc>,
    pub status: MediaStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MediaVersion {
    /// Display label (`v3`) snapshotted onto comments posted while this is
    /// the current version.
    pub fn version_label(&self) -> String {
        format!("v{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_strings() {
        assert_eq!(
            serde_json::to_string(&MediaStatus::UnderReview).unwrap(),
            "\"under-review\""
        );
        assert_eq!(
            serde_json::to_string(&MediaStatus::NotApproved).unwrap(),
            "\"not-approved\""
        );
    }

    #[test]
    fn first_upload_notice_tracks_kind() {
        assert_eq!(MediaKind::Photo.first_upload_notice(), NoticeKind::NewPhoto);
        assert_eq!(MediaKind::Video.first_upload_notice(), NoticeKind::NewVideo);
    }

    #[test]
    fn media_round_trips_with_camel_case_fields() {
        let media = MediaVersion {
            id: "photo-1".to_string(),
            project_id: ProjectId::new("test-house"),
            kind: MediaKind::Photo,
            file_name: "p1.jpg".to_string(),
            url: "url1".to_string(),
            version: 1,
            uploaded_at: Utc::now(),
            status: MediaStatus::UnderReview,
            approved_by: None,
            approved_at: None,
            notes: Some("first pass".to_string()),
        };
        let json = serde_json::to_value(&media).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("uploadedAt").is_some());
        assert!(json.get("approvedBy").is_some());
        let back: MediaVersion = serde_json::from_value(json).unwrap();
        assert_eq!(back, media);
        assert_eq!(back.version_label(), "v1");
    }
}
