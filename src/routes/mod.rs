//! 라우트 구성
//!
//! `/api/v1` 아래의 모든 엔드포인트를 조립합니다. 보호가 필요한 리소스는
//! [`AuthMiddleware`]로 감싸며, 게이트의 요구 역할 집합은 라우트별로
//! 지정됩니다.

use crate::domain::entities::user::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_user_routes(cfg);
    configure_auth_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/user")
            // 공개: 회원가입
            .service(handlers::users::register)
            // 관리자 전용: 전체 사용자 목록
            .service(
                web::resource("/all-users")
                    .wrap(AuthMiddleware::roles(&[Role::Admin, Role::SuperAdmin]))
                    .route(web::get().to(handlers::users::all_users)),
            )
            // 인증 필요: 사용자 정보 수정 (본인/관리자 구분은 서비스에서)
            .service(
                web::resource("/{user_id}")
                    .wrap(AuthMiddleware::authenticated())
                    .route(web::patch().to(handlers::users::update_user)),
            ),
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 자격증명 인증
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::logout)
            .service(
                web::resource("/reset-password")
                    .wrap(AuthMiddleware::authenticated())
                    .route(web::post().to(handlers::auth::reset_password)),
            )
            // Google OAuth
            .service(handlers::auth::google_login)
            .service(handlers::auth::google_callback),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "tour_management_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
