//! 애플리케이션 상태
//!
//! 명시적으로 구성된 서비스 인스턴스들을 담아 actix의 `web::Data`로
//! 핸들러와 미들웨어에 공유되는 값입니다. 전역 레지스트리나 싱글톤 없이
//! `main`에서 한 번 조립됩니다.

use crate::{
    config::AppConfig,
    repositories::UserDirectory,
    services::{AuthService, GoogleAuthService, PasswordHasher, TokenService, UserService},
};
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub directory: Arc<dyn UserDirectory>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub google_auth_service: Arc<GoogleAuthService>,
}

impl AppState {
    /// 설정과 사용자 디렉터리로부터 전체 서비스 그래프를 조립합니다.
    pub fn new(config: AppConfig, directory: Arc<dyn UserDirectory>) -> Self {
        let token_service = Arc::new(TokenService::new(config.jwt.clone()));
        let hasher = Arc::new(PasswordHasher::new(&config.password));

        let auth_service = Arc::new(AuthService::new(
            directory.clone(),
            token_service.clone(),
            hasher.clone(),
        ));
        let user_service = Arc::new(UserService::new(directory.clone(), hasher));
        let google_auth_service = Arc::new(GoogleAuthService::new(
            directory.clone(),
            config.google.clone(),
        ));

        Self {
            config,
            directory,
            token_service,
            auth_service,
            user_service,
            google_auth_service,
        }
    }
}
