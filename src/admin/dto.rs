use serde::{Deserialize, Serialize};
use time::Date;

use crate::date::calendar_date;
use crate::error::{ApiError, Result};
use crate::http::Paged;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_no: i64,
    pub user_name: String,
    pub status: String,
    #[serde(default)]
    pub ban_days: i64,
    #[serde(default)]
    pub report_no: i64,
    #[serde(default)]
    pub official_rcp: i64,
    #[serde(default)]
    pub ch_request: i64,
}

/// Suspension lengths offered in the user table.
pub const BAN_DAYS: [u32; 4] = [3, 7, 30, 365];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancmt_no: Option<i64>,
    pub content: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
}

impl Announcement {
    pub fn validate(&self) -> Result<()> {
        check_period(self.start_date, self.end_date)?;
        if self.content.trim().is_empty() {
            return Err(ApiError::Validation("공지 내용을 입력해주세요.".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeInfo {
    pub ch_info_no: i64,
    pub title: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Image attached to a challenge, sent as the `upfile` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: bytes::Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeForm {
    /// Set when editing an existing challenge.
    pub ch_info_no: Option<i64>,
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
    pub image: Option<Upload>,
}

impl ChallengeForm {
    pub fn validate(&self) -> Result<()> {
        check_period(self.start_date, self.end_date)?;
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("챌린지 제목을 입력해주세요.".into()));
        }
        Ok(())
    }
}

pub type PagedUsers = Paged<UserInfo>;
pub type PagedAnnouncements = Paged<Announcement>;
pub type PagedChallenges = Paged<ChallengeInfo>;

pub fn check_period(start: Date, end: Date) -> Result<()> {
    if start > end {
        return Err(ApiError::Validation(
            "종료일은 시작일보다 빠를 수 없습니다.".into(),
        ));
    }
    Ok(())
}
