//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//!
//! ## 이중 비밀키
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명됩니다.
//! 액세스 토큰을 리프레시 검증 경로에 넣거나 그 반대로 넣으면
//! 서명 불일치로 거부됩니다.
//!
//! ## 만료와 서명 오류의 구분
//!
//! 검증 실패는 두 가지 복구 경로로 나뉩니다. `TokenExpired`는 리프레시
//! 플로우의 정상 트리거이고, `TokenInvalid`(서명 불일치/형식 오류)는
//! 재인증 대상입니다. 만료 판정에 leeway를 두지 않으므로 TTL이 0 이하인
//! 토큰은 즉시 만료로 판정됩니다.

use crate::{
    config::JwtConfig,
    domain::entities::user::User,
    domain::models::token::{TokenClaims, TokenPair},
    errors::AppError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 토큰을 생성하고 검증합니다.
/// 비밀키와 TTL은 [`JwtConfig`]로 생성 시점에 주입됩니다.
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// 사용자 정보로부터 클레임을 구성하여 서명된 토큰 생성
    ///
    /// 클레임은 `{sub, email, role}`에 발급/만료 시각을 더한 것입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID 없음 또는 인코딩 실패
    pub fn issue(&self, user: &User, secret: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::TokenExpired` - 유효 기간이 지난 토큰 (leeway 없음)
    /// * `AppError::TokenInvalid` - 서명 불일치 또는 형식 오류
    pub fn verify(&self, token: &str, secret: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        let mut validation = Validation::default();
        // 만료 판정에 유예를 두지 않는다
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::TokenInvalid,
            })?;

        // 경계 시각(now == exp)도 만료로 취급한다. TTL 0 토큰은 발급 직후에도 만료
        if claims.exp <= Utc::now().timestamp() {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }

    /// 액세스 토큰 발급 (액세스 비밀키, 단기 TTL)
    pub fn issue_access_token(&self, user: &User) -> Result<String, AppError> {
        self.issue(
            user,
            &self.config.access_secret,
            Duration::seconds(self.config.access_expiration_secs),
        )
    }

    /// 리프레시 토큰 발급 (리프레시 비밀키, 장기 TTL)
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, AppError> {
        self.issue(
            user,
            &self.config.refresh_secret,
            Duration::days(self.config.refresh_expiration_days),
        )
    }

    /// 세션 발급: 액세스 + 리프레시 토큰 쌍 생성
    pub fn issue_session(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.issue_access_token(user)?;
        let refresh_token = self.issue_refresh_token(user)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 액세스 토큰 검증
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify(token, &self.config.access_secret)
    }

    /// 리프레시 토큰 검증
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify(token, &self.config.refresh_secret)
    }

    /// Authorization 헤더에서 토큰 추출
    ///
    /// `Bearer {token}` 형식과 접두사 없는 순수 토큰을 모두 허용합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> &'a str {
        auth_header
            .strip_prefix("Bearer ")
            .unwrap_or(auth_header)
            .trim()
    }
}
