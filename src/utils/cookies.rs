//! 인증 쿠키 헬퍼
//!
//! 로그인/갱신/로그아웃 핸들러가 공유하는 HTTP-only 쿠키 생성 유틸입니다.

use actix_web::cookie::{time::Duration, Cookie};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// HTTP-only 인증 쿠키 생성
pub fn auth_cookie(name: &'static str, value: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(name, value.to_owned())
        .path("/")
        .http_only(true)
        .secure(false)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// 쿠키 제거용 (만료 시간 0)
pub fn clear_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .finish()
}
