//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰을 페어링 한 정보를 표시합니다.

use crate::domain::entities::user::Role;
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다. 클레임은 발급 시점의
/// 사용자 상태 스냅샷이며, 토큰 유효 기간 안에서만 신뢰됩니다. 권한이
/// 필요한 동작 전에는 반드시 저장소의 현재 사용자 상태와 대조합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID, ObjectId 16진수 문자열)
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 발급 시점의 사용자 역할
    pub role: Role,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 로그인/OAuth 성공 시 클라이언트에게 전달되는 토큰 집합입니다.
/// 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신 전용 장기 토큰)
    pub refresh_token: String,
}
