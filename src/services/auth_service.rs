//! # 인증 서비스 구현
//!
//! 로그인, 토큰 갱신(리프레시 회전), 비밀번호 재설정, 로그아웃을
//! 오케스트레이션하는 핵심 비즈니스 로직입니다. 토큰 코덱, 비밀번호
//! 해시기, 사용자 디렉터리를 조합하며, 모든 실패를 타입이 있는
//! [`AppError`]로 전파합니다.
//!
//! ## 상태 게이트 불변식
//!
//! 차단(BLOCKED)/비활성(INACTIVE) 상태이거나 소프트 삭제된 계정은
//! 구조적으로 유효한 토큰·올바른 자격증명을 갖고 있어도 로그인과 토큰
//! 갱신을 절대 통과하지 못합니다. 리프레시 토큰은 수명이 길기 때문에
//! 회전 시마다 토큰에 내장된 클레임이 아니라 **디렉터리의 현재 상태**를
//! 기준으로 권한과 상태를 재평가합니다.

use crate::{
    domain::dto::response::{LoginResponse, UserResponse},
    domain::models::auth::AuthenticatedClaims,
    domain::models::token::TokenPair,
    domain::entities::user::User,
    errors::AppError,
    repositories::UserDirectory,
    services::{PasswordHasher, TokenService},
};
use mongodb::bson::DateTime;
use std::sync::Arc;

/// 인증 오케스트레이션 서비스
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            directory,
            tokens,
            hasher,
        }
    }

    /// 자격증명 로그인
    ///
    /// # 처리 순서
    ///
    /// 1. 이메일로 사용자 조회 → `UserNotFound`
    /// 2. 비밀번호 해시 대조 → `IncorrectPassword`
    /// 3. 계정 상태 게이트 → `UserBlocked` / `UserDeleted`
    /// 4. 세션(토큰 쌍) 발급 및 해시 제거된 사용자 정보 반환
    ///
    /// 실패 횟수에 따른 계정 잠금은 없습니다.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // OAuth 전용 계정(해시 없음)도 자격증명 불일치로 취급
        let digest = user
            .password_hash
            .as_deref()
            .ok_or(AppError::IncorrectPassword)?;

        if !self.hasher.matches(password, digest)? {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::IncorrectPassword);
        }

        user.ensure_active()?;

        let session = self.tokens.issue_session(&user)?;

        log::info!("로그인 성공: {}", email);

        Ok(LoginResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user: UserResponse::from(user),
        })
    }

    /// 리프레시 토큰 회전: 새 액세스 토큰 발급
    ///
    /// # 처리 순서
    ///
    /// 1. 리프레시 비밀키로 토큰 검증 → `TokenExpired` / `TokenInvalid`
    /// 2. 클레임의 이메일로 현재 사용자 조회 → `UserNotFound`
    /// 3. 계정 상태 게이트 → `UserBlocked` / `UserDeleted`
    /// 4. **현재** 사용자 상태로부터 클레임을 재구성하여 액세스 토큰 발급
    ///    (발급 이후 역할이 바뀌었다면 새 토큰에 반영됨)
    pub async fn rotate_refresh_token(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        let user = self
            .directory
            .find_by_email(&claims.email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if let Err(e) = user.ensure_active() {
            log::warn!("제한된 계정의 토큰 갱신 시도: {}", claims.email);
            return Err(e);
        }

        self.tokens.issue_access_token(&user)
    }

    /// 비밀번호 재설정
    ///
    /// 인증된 요청의 클레임 주체(`sub`)로 사용자를 찾고, 기존 비밀번호가
    /// 일치할 때만 새 해시를 저장합니다.
    pub async fn reset_password(
        &self,
        old_password: &str,
        new_password: &str,
        claims: &AuthenticatedClaims,
    ) -> Result<(), AppError> {
        let mut user = self
            .directory
            .find_by_id(&claims.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let digest = user
            .password_hash
            .as_deref()
            .ok_or(AppError::IncorrectPassword)?;

        if !self.hasher.matches(old_password, digest)? {
            return Err(AppError::IncorrectPassword);
        }

        user.password_hash = Some(self.hasher.hash(new_password)?);
        user.updated_at = DateTime::now();

        self.directory.save(&user).await?;

        log::info!("비밀번호 재설정 완료: 사용자 ID {}", claims.user_id);

        Ok(())
    }

    /// 로그아웃
    ///
    /// 서버 측 세션 저장소가 없으므로 할 일은 클라이언트 쿠키 제거뿐입니다
    /// (핸들러가 수행). 알려진 한계: 로그아웃 이전에 발급된 리프레시 토큰은
    /// 블랙리스트가 없어 자연 만료까지 유효합니다.
    pub fn logout(&self) {
        log::debug!("로그아웃 처리 (상태 없음, 쿠키 제거는 핸들러 담당)");
    }

    /// OAuth 로그인 세션 발급
    ///
    /// 외부 OAuth 교환으로 이미 확인된 사용자에게 자격증명 로그인과 동일한
    /// 세션을 발급합니다. 비밀번호 검증만 생략되며 상태 게이트는 그대로
    /// 적용됩니다.
    pub fn oauth_login(&self, user: &User) -> Result<TokenPair, AppError> {
        user.ensure_active()?;
        self.tokens.issue_session(user)
    }
}
