use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Structured failure body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {message}")]
    Unauthorized {
        error_code: Option<String>,
        message: String,
    },

    #[error("{error_code} ({status}): {message}")]
    Api {
        status: StatusCode,
        error_code: String,
        message: String,
    },

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(&body).ok();
        if status == StatusCode::UNAUTHORIZED {
            return match parsed {
                Some(b) => ApiError::Unauthorized {
                    error_code: Some(b.error_code),
                    message: b.message,
                },
                None => ApiError::Unauthorized {
                    error_code: None,
                    message: body,
                },
            };
        }
        match parsed {
            Some(b) => ApiError::Api {
                status,
                error_code: b.error_code,
                message: b.message,
            },
            None => ApiError::Status { status, body },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Api { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Api { error_code, .. } => Some(error_code),
            ApiError::Unauthorized { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user in an alert or modal.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api {
                error_code,
                message,
                ..
            } => message_for_code(error_code)
                .map(str::to_string)
                .unwrap_or_else(|| message.clone()),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Unauthorized { error_code, .. } => error_code
                .as_deref()
                .and_then(message_for_code)
                .unwrap_or("로그인이 필요합니다.")
                .to_string(),
            ApiError::NotAuthenticated => "로그인이 필요합니다.".to_string(),
            other => other.to_string(),
        }
    }
}

pub fn message_for_code(code: &str) -> Option<&'static str> {
    let msg = match code {
        "WRONG_PASSWORD" => "비밀번호가 일치하지 않습니다.",
        "WRONG_EMAIL" => "존재하지 않는 이메일입니다.",
        "ACCOUNT_LOCKED" => "계정이 잠겼습니다. 관리자에게 문의하세요.",
        "EMAIL_ALREADY_EXISTS" => "이미 가입된 이메일입니다.",
        "USERNAME_ALREADY_EXISTS" => "이미 사용 중인 닉네임입니다.",
        "INVALID_EMAIL" => "올바른 이메일 형식이 아닙니다.",
        "INVALID_USERNAME" => "닉네임은 4~16바이트의 영문/숫자/한글만 가능합니다.",
        "INVALID_PASSWORD" => "비밀번호는 8~15자의 영문, 숫자, 특수문자를 포함해야 합니다.",
        "UPDATE_FAILED" => "회원정보 수정에 실패했습니다.",
        "INTERNAL_SERVER_ERROR" => "서버 오류가 발생했습니다.",
        "INVALID_CURRENT_PASSWORD" => "현재 비밀번호가 맞지않습니다.",
        "LARGE_FILE" => "파일이 너무 큽니다. 다른 파일을 올려주세요.",
        "UPLOAD_FAILED" => "업로드 실패. 파일형식 또는 네트워크를 확인해주세요.",
        "INACTIVE_USER" => "회원탈퇴신청한 회원입니다.",
        _ => return None,
    };
    Some(msg)
}
