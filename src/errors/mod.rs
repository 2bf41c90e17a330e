//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 투어 관리 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 인증/인가 과정에서 발생하는 실패는 모두 고유한 변형(variant)으로 구분됩니다.
//! 특히 토큰 만료(`TokenExpired`)와 서명/형식 오류(`TokenInvalid`)는
//! 클라이언트의 복구 경로가 다르므로 절대 하나로 합치지 않습니다.
//! 만료는 리프레시 플로우의 정상적인 트리거이고, 서명 오류는 재로그인 대상입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn login(email: &str) -> Result<User, AppError> {
//!     let user = directory.find_by_email(email).await?
//!         .ok_or(AppError::UserNotFound)?;
//!     Ok(user)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증 실패의 종류별 변형과 시스템 레벨 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
/// 어떤 컴포넌트도 인증 실패를 조용히 삼키지 않고 이 타입으로 전파합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// Authorization 헤더가 없음 (401 Unauthorized)
    #[error("인증 토큰이 없습니다")]
    NoToken,

    /// 서명 불일치 또는 형식이 잘못된 토큰 (401 Unauthorized)
    #[error("유효하지 않은 토큰입니다")]
    TokenInvalid,

    /// 유효 기간이 지난 토큰 (401 Unauthorized), 리프레시 플로우의 정상 트리거
    #[error("토큰이 만료되었습니다")]
    TokenExpired,

    /// 해당 사용자가 존재하지 않음 (404 Not Found)
    #[error("사용자를 찾을 수 없습니다")]
    UserNotFound,

    /// 차단되었거나 비활성 상태인 계정 (403 Forbidden)
    #[error("차단되었거나 비활성화된 계정입니다")]
    UserBlocked,

    /// 소프트 삭제된 계정 (403 Forbidden)
    #[error("삭제된 계정입니다")]
    UserDeleted,

    /// 비밀번호 불일치 (401 Unauthorized)
    #[error("잘못된 이메일 또는 비밀번호입니다")]
    IncorrectPassword,

    /// 역할이 요구 조건을 만족하지 않음 (403 Forbidden)
    #[error("접근 권한이 없습니다")]
    PermissionDenied,

    /// 이미 동일한 이메일로 등록된 계정이 있음 (409 Conflict)
    #[error("이미 등록된 사용자입니다")]
    UserAlreadyExists,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("입력값 검증 실패: {0}")]
    ValidationError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 외부 서비스(OAuth 프로바이더 등) 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 이 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::NoToken
            | AppError::TokenInvalid
            | AppError::TokenExpired
            | AppError::IncorrectPassword => StatusCode::UNAUTHORIZED,
            AppError::UserBlocked | AppError::UserDeleted | AppError::PermissionDenied => {
                StatusCode::FORBIDDEN
            }
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 5xx 계열은 내부 상세(스택, 드라이버 메시지)를 숨기고 일반 메시지로 대체합니다.
    fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            "서버 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 `{ success, message, statusCode }` 형태의 JSON 본문으로
    /// 변환됩니다. 5xx 에러의 내부 상세는 로그에만 남기고 응답에는 싣지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = AppError::status_code(self);

        if status.is_server_error() {
            log::error!("내부 오류: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": self.client_message(),
            "statusCode": status.as_u16(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(AppError::NoToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::IncorrectPassword.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::UserBlocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::UserDeleted.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::PermissionDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::UserAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[actix_web::test]
    async fn test_error_response_body_shape() {
        let error = AppError::PermissionDenied;
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["statusCode"], serde_json::json!(403));
        assert!(body["message"].is_string());
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let error = AppError::DatabaseError("connection pool exhausted".to_string());
        assert_eq!(
            error.client_message(),
            "서버 오류가 발생했습니다".to_string()
        );

        let error = AppError::IncorrectPassword;
        assert_eq!(error.client_message(), error.to_string());
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("email: 형식 오류".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
