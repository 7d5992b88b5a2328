use tracing::{info, instrument};

use super::dto::{
    Announcement, ChallengeForm, PagedAnnouncements, PagedChallenges, PagedUsers, BAN_DAYS,
};
use crate::date::format_ymd;
use crate::error::{ApiError, Result};
use crate::http::{ApiClient, ApiRequest, FormPart};

const USERS: &str = "/admin/users";
const ANNOUNCEMENTS: &str = "/admin/announcements";
const CHALLENGES: &str = "/admin/challenges";

fn paged(path: &str, page: u32, size: u32) -> ApiRequest {
    ApiRequest::get(path).query("page", page.max(1)).query("size", size)
}

#[instrument(skip(api))]
pub async fn list_users(api: &ApiClient, page: u32, size: u32) -> Result<PagedUsers> {
    api.send_json(paged(USERS, page, size)).await
}

#[instrument(skip(api))]
pub async fn ban_user(api: &ApiClient, user_no: i64, days: u32) -> Result<()> {
    if !BAN_DAYS.contains(&days) {
        return Err(ApiError::Validation(format!("지원하지 않는 정지 기간입니다: {days}일")));
    }
    let req = ApiRequest::patch(format!("{USERS}/{user_no}/ban")).query("days", days);
    api.send_unit(req).await?;
    info!(user_no, days, "user banned");
    Ok(())
}

// --- announcements ---

#[instrument(skip(api))]
pub async fn list_announcements(
    api: &ApiClient,
    page: u32,
    size: u32,
) -> Result<PagedAnnouncements> {
    api.send_json(paged(ANNOUNCEMENTS, page, size)).await
}

#[instrument(skip(api, ann))]
pub async fn create_announcement(api: &ApiClient, ann: &Announcement) -> Result<()> {
    ann.validate()?;
    api.send_unit(ApiRequest::post(ANNOUNCEMENTS).json(ann)?).await
}

#[instrument(skip(api, ann), fields(ancmt_no = ann.ancmt_no))]
pub async fn update_announcement(api: &ApiClient, ann: &Announcement) -> Result<()> {
    ann.validate()?;
    if ann.ancmt_no.is_none() {
        return Err(ApiError::Validation("수정할 공지사항이 없습니다.".into()));
    }
    api.send_unit(ApiRequest::put(ANNOUNCEMENTS).json(ann)?).await
}

#[instrument(skip(api))]
pub async fn delete_announcement(api: &ApiClient, ancmt_no: i64) -> Result<()> {
    api.send_unit(ApiRequest::delete(format!("{ANNOUNCEMENTS}/{ancmt_no}")))
        .await
}

// --- challenges ---

#[instrument(skip(api))]
pub async fn list_challenges(api: &ApiClient, page: u32, size: u32) -> Result<PagedChallenges> {
    api.send_json(paged(CHALLENGES, page, size)).await
}

fn challenge_parts(form: &ChallengeForm) -> Vec<FormPart> {
    let mut parts = vec![
        FormPart::text("title", form.title.clone()),
        FormPart::text("startDate", format_ymd(form.start_date)),
        FormPart::text("endDate", format_ymd(form.end_date)),
    ];
    if let Some(img) = &form.image {
        parts.push(FormPart::file(
            "upfile",
            img.file_name.clone(),
            img.mime.clone(),
            img.bytes.clone(),
        ));
    }
    if let Some(no) = form.ch_info_no {
        parts.push(FormPart::text("chInfoNo", no.to_string()));
    }
    parts
}

/// Creates the challenge, or edits it when `ch_info_no` is set.
#[instrument(skip(api, form), fields(ch_info_no = form.ch_info_no, title = %form.title))]
pub async fn save_challenge(api: &ApiClient, form: &ChallengeForm) -> Result<()> {
    form.validate()?;
    let req = match form.ch_info_no {
        Some(_) => ApiRequest::put(CHALLENGES),
        None => ApiRequest::post(CHALLENGES),
    };
    api.send_unit(req.multipart(challenge_parts(form))).await?;
    info!("challenge saved");
    Ok(())
}

#[instrument(skip(api))]
pub async fn delete_challenge(api: &ApiClient, ch_info_no: i64) -> Result<()> {
    api.send_unit(ApiRequest::delete(format!("{CHALLENGES}/{ch_info_no}")))
        .await
}
