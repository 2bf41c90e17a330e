//! # Google OAuth 사용자 정보 모델
//!
//! Google OAuth 2.0 인증 플로우에서 userinfo 엔드포인트가 반환하는
//! 사용자 정보를 매핑합니다.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정의 고유 ID (프로바이더 연결 키)
    pub id: String,

    pub email: String,

    pub name: String,

    pub picture: Option<String>,

    #[serde(default)]
    pub verified_email: bool,
}
