//! 사용자 핸들러

use crate::{
    domain::dto::request::{CreateUserRequest, UpdateUserRequest},
    domain::dto::response::ApiResponse,
    domain::models::auth::AuthenticatedClaims,
    errors::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse};
use validator::Validate;

/// 회원가입 (공개)
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state.user_service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(201, "사용자 생성 성공", user)))
}

/// 전체 사용자 목록
///
/// ADMIN / SUPER_ADMIN 게이트가 걸린 리소스에서 호출됩니다
/// (라우트 구성은 `routes` 모듈 참조).
pub async fn all_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (users, meta) = state.user_service.get_all_users().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_meta(
        200,
        "전체 사용자 조회 성공",
        users,
        meta,
    )))
}

/// 사용자 정보 수정 (본인 또는 관리자)
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    claims: AuthenticatedClaims,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state
        .user_service
        .update_user(&user_id, payload.into_inner(), &claims)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(200, "사용자 정보 수정 성공", user)))
}
