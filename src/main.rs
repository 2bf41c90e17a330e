//! 투어 관리 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 JWT 인증 기반의 REST API를 제공합니다.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::sync::Arc;
use tour_management_backend::caching::redis::RedisClient;
use tour_management_backend::config::AppConfig;
use tour_management_backend::db::Database;
use tour_management_backend::repositories::{UserDirectory, UserRepository};
use tour_management_backend::routes::configure_all_routes;
use tour_management_backend::services::PasswordHasher;
use tour_management_backend::state::AppState;
use tour_management_backend::utils::seed::seed_super_admin;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 투어 관리 백엔드 시작중...");

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        panic!("설정 로드 실패: {}", e);
    });

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores(&config).await;

    // 사용자 리포지토리 구성 (캐시 TTL은 액세스 토큰 수명으로 제한)
    let user_repo = Arc::new(UserRepository::new(
        database,
        redis_client,
        config.jwt.access_expiration_secs,
    ));

    user_repo
        .create_indexes()
        .await
        .expect("사용자 인덱스 생성 실패");

    // 슈퍼 관리자 시드
    let hasher = PasswordHasher::new(&config.password);
    let directory: Arc<dyn UserDirectory> = user_repo;
    if let Err(e) = seed_super_admin(&config.super_admin, directory.as_ref(), &hasher).await {
        error!("슈퍼 관리자 시드 실패: {}", e);
    }

    // 전체 서비스 그래프 조립
    let state = web::Data::new(AppState::new(config, directory));

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = state.config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API 엔드포인트: http://{}/api/v1", bind_address);

    HttpServer::new(move || {
        let cors = configure_cors(&state.config.frontend_url);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수에 따라 적절한 .env 파일을 로드합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 `RUST_LOG`를 기반으로 로깅 레벨을 설정합니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_data_stores(config: &AppConfig) -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(
        Database::new(&config.database)
            .await
            .expect("데이터베이스 연결 실패"),
    );

    let redis_client = Arc::new(
        RedisClient::new(&config.redis)
            .await
            .expect("Redis 연결 실패"),
    );

    (database, redis_client)
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS 설정입니다. 쿠키 기반 인증을 쓰므로
/// 자격 증명 지원이 켜져 있습니다.
fn configure_cors(frontend_url: &str) -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin(frontend_url)
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(쿠키) 지원
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
