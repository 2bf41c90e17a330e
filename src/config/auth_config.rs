//! # 인증 관련 설정
//!
//! JWT 토큰 서명과 Google OAuth 2.0 클라이언트, 슈퍼 관리자 시드 계정에
//! 대한 설정 값 객체를 정의합니다.
//!
//! ## JWT 이중 비밀키 정책
//!
//! 액세스 토큰과 리프레시 토큰은 **서로 다른 비밀키**로 서명됩니다.
//! 액세스 서명 키가 유출되더라도 리프레시 토큰을 위조할 수 없어야 하기
//! 때문입니다. 두 비밀키에 같은 값을 넣는 배포는 설정 오류로 간주합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # JWT
//! export JWT_ACCESS_SECRET="..."
//! export JWT_REFRESH_SECRET="..."
//! export JWT_ACCESS_EXPIRATION_SECS="3600"      # 기본 1시간
//! export JWT_REFRESH_EXPIRATION_DAYS="30"       # 기본 30일
//!
//! # Google OAuth 2.0
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/v1/auth/google/callback"
//! ```

use super::require_env;
use std::env;

/// JWT 토큰 서명 설정
///
/// 액세스/리프레시 토큰 각각의 비밀키와 유효 기간을 담습니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 액세스 토큰 서명 비밀키
    pub access_secret: String,
    /// 액세스 토큰 유효 기간 (초)
    pub access_expiration_secs: i64,
    /// 리프레시 토큰 서명 비밀키 (액세스 키와 분리)
    pub refresh_secret: String,
    /// 리프레시 토큰 유효 기간 (일)
    pub refresh_expiration_days: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            access_secret: require_env("JWT_ACCESS_SECRET")?,
            access_expiration_secs: env::var("JWT_ACCESS_EXPIRATION_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            refresh_secret: require_env("JWT_REFRESH_SECRET")?,
            refresh_expiration_days: env::var("JWT_REFRESH_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }

    /// 테스트용 설정 생성 헬퍼
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            access_secret: "test-access-secret".to_string(),
            access_expiration_secs: 3600,
            refresh_secret: "test-refresh-secret".to_string(),
            refresh_expiration_days: 30,
        }
    }
}

/// Google OAuth 2.0 클라이언트 설정
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 담습니다.
/// `client_secret`은 서버 사이드 전용이며 절대 로그에 출력하지 않습니다.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// 인증 완료 후 Google이 돌아올 콜백 URI (콘솔에 등록된 값과 일치해야 함)
    pub redirect_uri: String,
    /// 인증 엔드포인트 (기본값으로 충분)
    pub auth_uri: String,
    /// 토큰 교환 엔드포인트
    pub token_uri: String,
    /// 사용자 정보 엔드포인트
    pub userinfo_uri: String,
}

impl GoogleOAuthConfig {
    /// 테스트용 설정 생성 헬퍼
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: "http://localhost:8080/api/v1/auth/google/callback".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            client_id: require_env("GOOGLE_CLIENT_ID")?,
            client_secret: require_env("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: require_env("GOOGLE_REDIRECT_URI")?,
            auth_uri: env::var("GOOGLE_AUTH_URI")
                .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string()),
            token_uri: env::var("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string()),
            userinfo_uri: env::var("GOOGLE_USERINFO_URI")
                .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
        })
    }
}

/// 슈퍼 관리자 시드 계정 설정
///
/// 서버 기동 시 해당 이메일의 계정이 없으면 자동 생성됩니다.
#[derive(Debug, Clone)]
pub struct SuperAdminConfig {
    pub email: String,
    pub password: String,
}

impl SuperAdminConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            email: require_env("SUPER_ADMIN_EMAIL")?,
            password: require_env("SUPER_ADMIN_PASSWORD")?,
        })
    }
}
