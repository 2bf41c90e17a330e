//! 인증 게이트의 핵심 로직
//!
//! 검사 순서가 에러 우선순위를 결정하므로 순서 자체가 규약입니다:
//!
//! 1. 헤더 부재 → `NoToken`
//! 2. 토큰 구조/서명/만료 → `TokenExpired` / `TokenInvalid`
//! 3. 디렉터리 조회 실패 → `UserNotFound`
//! 4. 계정 상태 → `UserBlocked` / `UserDeleted`
//! 5. 역할 검사 → `PermissionDenied`
//!
//! 액세스 토큰이 구조적으로 유효하더라도 발급 이후 계정 상태가 바뀔 수
//! 있으므로, 매 요청마다 디렉터리에서 현재 상태를 재확인합니다.

use crate::domain::models::auth::{AuthenticatedClaims, RequiredRoles};
use crate::errors::AppError;
use crate::repositories::UserDirectory;
use crate::services::TokenService;
use crate::state::AppState;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;

/// 실제 게이트 검사를 수행하는 서비스
pub struct AuthGateService<S> {
    pub service: Rc<S>,
    pub required_roles: RequiredRoles,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_roles = self.required_roles.clone();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(state) = state else {
                let response =
                    AppError::InternalError("AppState가 등록되지 않았습니다".to_string())
                        .error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            let gate_result = authorize_request(
                auth_header.as_deref(),
                &required_roles,
                &state.token_service,
                state.directory.as_ref(),
            )
            .await;

            match gate_result {
                Ok(claims) => {
                    log::debug!("인증 성공: 사용자 ID {}", claims.user_id);
                    req.extensions_mut().insert(claims);
                }
                Err(err) => {
                    log::warn!("인증 실패: {}", err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 단일 요청에 대한 게이트 검사
///
/// 미들웨어와 분리된 자유 함수로 두어 HTTP 계층 없이 검사 순서를
/// 검증할 수 있습니다.
pub async fn authorize_request(
    auth_header: Option<&str>,
    required_roles: &RequiredRoles,
    tokens: &TokenService,
    directory: &dyn UserDirectory,
) -> Result<AuthenticatedClaims, AppError> {
    let header = auth_header.ok_or(AppError::NoToken)?;

    let token = tokens.extract_bearer_token(header);
    if token.is_empty() {
        return Err(AppError::NoToken);
    }

    let claims = tokens.verify_access_token(token)?;

    // 발급 이후 상태 변경 가능성 때문에 디렉터리의 현재 사용자로 재확인
    let user = directory
        .find_by_email(&claims.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    user.ensure_active()?;

    if !required_roles.is_satisfied(claims.role) {
        return Err(AppError::PermissionDenied);
    }

    Ok(AuthenticatedClaims::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, PasswordConfig};
    use crate::domain::entities::user::{ActivityStatus, Role, User};
    use crate::repositories::testing::InMemoryUserDirectory;
    use crate::services::PasswordHasher;
    use chrono::Duration;
    use std::sync::Arc;

    struct GateFixture {
        tokens: TokenService,
        directory: Arc<InMemoryUserDirectory>,
        user: User,
    }

    async fn fixture() -> GateFixture {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let hasher = PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 });

        let user = User::new_credentials(
            "홍길동".to_string(),
            "hong@example.com".to_string(),
            hasher.hash("Abc12345!").unwrap(),
        );
        let user = directory.create(user).await.unwrap();

        GateFixture {
            tokens: TokenService::new(JwtConfig::for_tests()),
            directory,
            user,
        }
    }

    async fn gate(
        f: &GateFixture,
        header: Option<&str>,
        required: RequiredRoles,
    ) -> Result<AuthenticatedClaims, AppError> {
        authorize_request(header, &required, &f.tokens, f.directory.as_ref()).await
    }

    #[actix_web::test]
    async fn test_missing_header_fails_no_token() {
        let f = fixture().await;

        let result = gate(&f, None, RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::NoToken)));

        let result = gate(&f, Some(""), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::NoToken)));
    }

    #[actix_web::test]
    async fn test_valid_token_passes_and_attaches_claims() {
        let f = fixture().await;
        let token = f.tokens.issue_access_token(&f.user).unwrap();

        let claims = gate(&f, Some(&token), RequiredRoles::any_authenticated())
            .await
            .unwrap();
        assert_eq!(claims.email, "hong@example.com");
        assert_eq!(claims.role, Role::User);

        // Bearer 접두사 형식도 허용
        let header = format!("Bearer {}", token);
        assert!(gate(&f, Some(&header), RequiredRoles::any_authenticated())
            .await
            .is_ok());
    }

    #[actix_web::test]
    async fn test_expired_token_precedes_directory_lookup() {
        let f = fixture().await;

        // 등록되지 않은 사용자의 만료 토큰: 코덱 실패가 조회 실패보다 우선
        let mut ghost = User::new_credentials(
            "유령".to_string(),
            "ghost@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        ghost.id = Some(mongodb::bson::oid::ObjectId::new());

        let expired = f
            .tokens
            .issue(&ghost, "test-access-secret", Duration::seconds(0))
            .unwrap();

        let result = gate(&f, Some(&expired), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[actix_web::test]
    async fn test_unknown_subject_fails_user_not_found() {
        let f = fixture().await;

        let mut ghost = User::new_credentials(
            "유령".to_string(),
            "ghost@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        ghost.id = Some(mongodb::bson::oid::ObjectId::new());

        let token = f.tokens.issue_access_token(&ghost).unwrap();

        let result = gate(&f, Some(&token), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[actix_web::test]
    async fn test_status_change_invalidates_live_token() {
        let f = fixture().await;
        let token = f.tokens.issue_access_token(&f.user).unwrap();

        // 토큰은 유효하지만 발급 이후 차단됨
        let mut user = f.user.clone();
        user.is_active = ActivityStatus::Blocked;
        f.directory.save(&user).await.unwrap();

        let result = gate(&f, Some(&token), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::UserBlocked)));

        user.is_active = ActivityStatus::Active;
        user.is_deleted = true;
        f.directory.save(&user).await.unwrap();

        let result = gate(&f, Some(&token), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::UserDeleted)));
    }

    #[actix_web::test]
    async fn test_role_mismatch_fails_permission_denied() {
        let f = fixture().await;
        let token = f.tokens.issue_access_token(&f.user).unwrap();

        // USER 역할 토큰으로 ADMIN 전용 게이트 통과 시도
        let result = gate(&f, Some(&token), RequiredRoles::of(&[Role::Admin])).await;
        assert!(matches!(result, Err(AppError::PermissionDenied)));

        // 역할 집합에 포함되면 통과
        let result = gate(
            &f,
            Some(&token),
            RequiredRoles::of(&[Role::Admin, Role::User]),
        )
        .await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn test_status_check_precedes_role_check() {
        let f = fixture().await;
        let token = f.tokens.issue_access_token(&f.user).unwrap();

        let mut user = f.user.clone();
        user.is_active = ActivityStatus::Blocked;
        f.directory.save(&user).await.unwrap();

        // 역할도 불충분하지만 상태 실패가 먼저 보고됨
        let result = gate(&f, Some(&token), RequiredRoles::of(&[Role::Admin])).await;
        assert!(matches!(result, Err(AppError::UserBlocked)));
    }

    #[actix_web::test]
    async fn test_tampered_token_fails_before_everything_else() {
        let f = fixture().await;

        let result = gate(
            &f,
            Some("definitely.not.valid"),
            RequiredRoles::of(&[Role::Admin]),
        )
        .await;
        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[actix_web::test]
    async fn test_refresh_token_rejected_at_gate() {
        let f = fixture().await;

        // 리프레시 토큰(다른 비밀키)은 게이트에서 거부
        let refresh = f.tokens.issue_refresh_token(&f.user).unwrap();
        let result = gate(&f, Some(&refresh), RequiredRoles::any_authenticated()).await;
        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }
}
