//! 인증 핸들러
//!
//! 로그인, 토큰 갱신, 로그아웃, 비밀번호 재설정, Google OAuth 플로우의
//! HTTP 진입점입니다. 토큰은 응답 본문과 HTTP-only 쿠키 양쪽으로
//! 전달됩니다.

use crate::{
    domain::dto::request::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest, ResetPasswordRequest},
    domain::dto::response::{AccessTokenResponse, ApiResponse},
    domain::models::auth::AuthenticatedClaims,
    errors::AppError,
    state::AppState,
    utils::cookies::{auth_cookie, clear_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let login_info = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let access_ttl = state.config.jwt.access_expiration_secs;
    let refresh_ttl = state.config.jwt.refresh_expiration_days * 86_400;

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(
            ACCESS_TOKEN_COOKIE,
            &login_info.access_token,
            access_ttl,
        ))
        .cookie(auth_cookie(
            REFRESH_TOKEN_COOKIE,
            &login_info.refresh_token,
            refresh_ttl,
        ))
        .json(ApiResponse::ok(200, "로그인 성공", login_info)))
}

/// 리프레시 토큰으로 새 액세스 토큰 발급
///
/// 리프레시 토큰은 `refreshToken` 쿠키에서 읽고, 쿠키가 없으면 요청
/// 본문을 폴백으로 사용합니다. 둘 다 없으면 클라이언트 에러입니다.
#[post("/refresh-token")]
pub async fn refresh_token(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            body.as_ref()
                .map(|b| b.refresh_token.clone())
                .filter(|t| !t.is_empty())
        })
        .ok_or_else(|| {
            AppError::ValidationError("리프레시 토큰이 제공되지 않았습니다".to_string())
        })?;

    let access_token = state
        .auth_service
        .rotate_refresh_token(&refresh_token)
        .await?;

    let access_ttl = state.config.jwt.access_expiration_secs;

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(ACCESS_TOKEN_COOKIE, &access_token, access_ttl))
        .json(ApiResponse::ok(
            200,
            "액세스 토큰 갱신 성공",
            AccessTokenResponse { access_token },
        )))
}

/// 로그아웃: 클라이언트 쿠키 제거
///
/// 서버 측 세션 저장소가 없으므로 쿠키 제거가 전부입니다. 이전에 발급된
/// 리프레시 토큰은 자연 만료까지 유효합니다 (알려진 한계).
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.auth_service.logout();

    Ok(HttpResponse::Ok()
        .cookie(clear_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(clear_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::ok_empty(200, "로그아웃 성공")))
}

/// 비밀번호 재설정
///
/// 인증 게이트가 걸린 리소스에서 호출됩니다 (라우트 구성은 `routes` 모듈 참조).
pub async fn reset_password(
    state: web::Data<AppState>,
    claims: AuthenticatedClaims,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .reset_password(&payload.old_password, &payload.new_password, &claims)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty(200, "비밀번호 재설정 성공")))
}

/// Google 로그인 시작: 인증 페이지로 리디렉션
#[get("/google")]
pub async fn google_login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let url = state.google_auth_service.authorization_url();

    Ok(HttpResponse::Found()
        .insert_header(("Location", url))
        .finish())
}

/// Google OAuth 콜백
///
/// 코드 교환과 사용자 업서트 후 자격증명 로그인과 동일한 세션을 발급하고,
/// 쿠키를 설정한 뒤 프론트엔드로 리디렉션합니다.
#[get("/google/callback")]
pub async fn google_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 사용자가 거부했거나 프로바이더 측 에러
    if let Some(error) = &query.error {
        let detail = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Google OAuth 에러: {} - {}", error, detail);
        return Err(AppError::ValidationError(detail.to_string()));
    }

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state
        .google_auth_service
        .authenticate_with_code(&query.code)
        .await?;

    let session = state.auth_service.oauth_login(&user)?;

    log::info!("Google OAuth 로그인 성공: {}", user.email);

    let access_ttl = state.config.jwt.access_expiration_secs;
    let refresh_ttl = state.config.jwt.refresh_expiration_days * 86_400;

    Ok(HttpResponse::Found()
        .cookie(auth_cookie(
            ACCESS_TOKEN_COOKIE,
            &session.access_token,
            access_ttl,
        ))
        .cookie(auth_cookie(
            REFRESH_TOKEN_COOKIE,
            &session.refresh_token,
            refresh_ttl,
        ))
        .insert_header(("Location", state.config.frontend_url.clone()))
        .finish())
}
