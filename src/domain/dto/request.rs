//! 요청 DTO
//!
//! 클라이언트 입력 데이터의 형태 검증을 담당합니다. 서비스 계층은 이미
//! 검증이 끝난 DTO를 전제로 동작합니다. JSON 필드는 camelCase를 따릅니다.

use crate::domain::entities::user::{ActivityStatus, Role};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 4, max = 30, message = "이름은 4-30자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "주소는 200자를 넘을 수 없습니다"))]
    pub address: Option<String>,
}

/// 로그인 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 토큰 갱신 요청 (쿠키가 없을 때의 본문 폴백)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 비밀번호 재설정 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "기존 비밀번호를 입력해주세요"))]
    pub old_password: String,

    #[validate(
        length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"),
        custom(function = "validate_password_strength")
    )]
    pub new_password: String,
}

/// 사용자 정보 수정 요청
///
/// `role`, `is_active`, `is_deleted`, `is_verified`는 관리자 전용 필드이며
/// 권한 검사는 서비스 계층에서 수행됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 4, max = 30, message = "이름은 4-30자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(
        length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"),
        custom(function = "validate_password_strength")
    )]
    pub password: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "주소는 200자를 넘을 수 없습니다"))]
    pub address: Option<String>,

    pub role: Option<Role>,
    pub is_active: Option<ActivityStatus>,
    pub is_deleted: Option<bool>,
    pub is_verified: Option<bool>,
}

/// OAuth 콜백 쿼리 파라미터
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    pub state: Option<String>,

    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 비밀번호 강도 검증: 대문자, 숫자, 특수문자를 각각 1자 이상 포함
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_uppercase && has_digit && has_special) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 숫자, 특수문자를 포함해야 합니다".into()));
    }

    Ok(())
}

/// 전화번호 형식 검증: 숫자와 +, -, 공백만 허용, 7-20자
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let valid_chars = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ');

    if !valid_chars || phone.len() < 7 || phone.len() > 20 {
        return Err(
            ValidationError::new("invalid_phone").with_message("유효하지 않은 전화번호입니다".into())
        );
    }

    Ok(())
}
