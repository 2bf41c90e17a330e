//! # Google OAuth 인증 서비스
//!
//! Google OAuth 2.0 Authorization Code Grant 플로우를 처리하는 외부 교환
//! 협력자입니다. 인증 URL 생성, 토큰 교환, 사용자 정보 조회, 그리고
//! 로컬 사용자 디렉터리와의 동기화(업서트)를 담당합니다.
//!
//! ## 계정 연결 정책
//!
//! 동일 이메일의 계정이 이미 있으면 새 계정을 만들지 않고 해당 계정에
//! `google` 프로바이더 연결을 추가합니다(자격증명 + Google 복수 연결).
//! 계정이 없으면 비밀번호 없는 인증 완료 상태의 새 계정을 생성합니다.

use crate::{
    config::GoogleOAuthConfig,
    domain::dto::response::GoogleTokenResponse,
    domain::entities::user::{AuthProviderKind, AuthProviderLink, User},
    domain::models::oauth::GoogleUserInfo,
    errors::AppError,
    repositories::UserDirectory,
};
use mongodb::bson::DateTime;
use std::sync::Arc;
use uuid::Uuid;

/// Google OAuth 교환 서비스
pub struct GoogleAuthService {
    directory: Arc<dyn UserDirectory>,
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(directory: Arc<dyn UserDirectory>, config: GoogleOAuthConfig) -> Self {
        Self {
            directory,
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Google 인증 페이지로 보낼 authorization URL 생성
    pub fn authorization_url(&self) -> String {
        let state = Uuid::new_v4().to_string();

        let params = [
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("scope", "openid email profile".to_string()),
            ("response_type", "code".to_string()),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    /// Authorization code로 전체 인증 플로우 수행
    ///
    /// 1. 코드를 액세스 토큰으로 교환
    /// 2. 액세스 토큰으로 사용자 정보 조회
    /// 3. 로컬 디렉터리에 업서트 후 사용자 반환
    pub async fn authenticate_with_code(&self, auth_code: &str) -> Result<User, AppError> {
        let token_response = self.exchange_code_for_token(auth_code).await?;
        let google_user = self.fetch_user_info(&token_response.access_token).await?;

        self.upsert_google_user(google_user).await
    }

    async fn exchange_code_for_token(
        &self,
        auth_code: &str,
    ) -> Result<GoogleTokenResponse, AppError> {
        let params = [
            ("code", auth_code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    /// Google 사용자 정보를 로컬 디렉터리에 업서트
    async fn upsert_google_user(&self, google_user: GoogleUserInfo) -> Result<User, AppError> {
        match self.directory.find_by_email(&google_user.email).await? {
            Some(mut existing) => {
                if existing.has_provider(AuthProviderKind::Google) {
                    log::info!("Google 사용자 로그인: {}", google_user.email);
                    return Ok(existing);
                }

                // 기존 자격증명 계정에 Google 연결 추가
                log::info!("기존 계정에 Google 연결 추가: {}", google_user.email);
                existing.link_provider(AuthProviderLink {
                    provider: AuthProviderKind::Google,
                    provider_id: google_user.id,
                });
                if existing.picture.is_none() {
                    existing.picture = google_user.picture;
                }
                existing.updated_at = DateTime::now();

                self.directory.save(&existing).await
            }
            None => {
                log::info!("새 Google 사용자 등록: {}", google_user.email);
                let user = User::new_oauth(
                    google_user.name,
                    google_user.email,
                    AuthProviderKind::Google,
                    google_user.id,
                    google_user.picture,
                );

                self.directory.create(user).await
            }
        }
    }
}
