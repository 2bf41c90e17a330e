//! 응답 DTO
//!
//! 비즈니스 로직 처리 결과를 클라이언트에게 전달하는 구조체들입니다.
//! 민감한 정보(비밀번호 해시)는 엔티티에서 DTO로 변환되는 시점에 제거되며,
//! 모든 응답은 `{ success, statusCode, message, data[, meta] }` 봉투를
//! 따릅니다.

use crate::domain::entities::user::{ActivityStatus, AuthProviderLink, Role, User};
use serde::{Deserialize, Serialize};

/// 공통 응답 봉투
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// 목록 응답에 동봉되는 메타 정보
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub total: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(status_code: u16, message: &str, data: T) -> Self {
        Self {
            success: true,
            status_code,
            message: message.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn ok_with_meta(status_code: u16, message: &str, data: T, meta: Meta) -> Self {
        Self {
            success: true,
            status_code,
            message: message.to_string(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// 본문 데이터가 없는 성공 응답
    pub fn ok_empty(status_code: u16, message: &str) -> Self {
        Self {
            success: true,
            status_code,
            message: message.to_string(),
            data: None,
            meta: None,
        }
    }
}

/// 사용자 정보 응답
///
/// 비밀번호 해시가 제거된 안전한 사용자 표현입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    pub is_active: ActivityStatus,
    pub is_deleted: bool,
    pub is_verified: bool,
    pub auths: Vec<AuthProviderLink>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            phone,
            picture,
            address,
            role,
            is_active,
            is_deleted,
            is_verified,
            auths,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            phone,
            picture,
            address,
            role,
            is_active,
            is_deleted,
            is_verified,
            auths,
            created_at: created_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
            updated_at: updated_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
        }
    }
}

/// 로그인 성공 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// 토큰 갱신 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Google 토큰 교환 엔드포인트 응답 (Google 측 네이밍 유지)
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i32,
    pub refresh_token: Option<String>,
    pub scope: String,
}
