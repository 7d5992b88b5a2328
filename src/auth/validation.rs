use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{message_for_code, ApiError, Result};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PASSWORD_CHARS_RE: Regex = Regex::new(r"^[A-Za-z0-9!@#$%^&*()_+\-=\[\]{};':,.<>/?~`|\\]+$").unwrap();
    static ref LETTER_RE: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9가-힣]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 8 to 15 characters with at least one letter, one digit and one symbol.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    (8..=15).contains(&len)
        && PASSWORD_CHARS_RE.is_match(password)
        && LETTER_RE.is_match(password)
        && DIGIT_RE.is_match(password)
        && SPECIAL_RE.is_match(password)
}

/// 4 to 16 bytes where a Hangul syllable counts as two bytes.
pub fn is_valid_username(username: &str) -> bool {
    if !USERNAME_RE.is_match(username) {
        return false;
    }
    let bytes: usize = username
        .chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum();
    (4..=16).contains(&bytes)
}

fn reject(code: &str) -> ApiError {
    ApiError::Validation(message_for_code(code).unwrap_or(code).to_string())
}

/// Normalises and checks login credentials before they leave the client.
pub fn check_login(email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(reject("INVALID_EMAIL"));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("비밀번호를 입력해주세요.".into()));
    }
    if !is_valid_password(password) {
        return Err(reject("INVALID_PASSWORD"));
    }
    Ok(email)
}

/// Same rules as login, plus the nickname when one is chosen up front.
pub fn check_signup(email: &str, password: &str, username: Option<&str>) -> Result<String> {
    let email = check_login(email, password)?;
    if let Some(name) = username {
        if !is_valid_username(name) {
            return Err(reject("INVALID_USERNAME"));
        }
    }
    Ok(email)
}
