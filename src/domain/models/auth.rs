//! 요청 컨텍스트에 부착되는 인증 정보

use crate::domain::entities::user::Role;
use crate::domain::models::token::TokenClaims;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

/// 게이트를 통과한 요청의 검증된 클레임
///
/// 인증 미들웨어가 Request Extensions에 저장하며, 핸들러는 이 추출자를
/// 함수 인자로 받아 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedClaims {
    /// 사용자 고유 ID
    pub user_id: String,
    /// 사용자 이메일
    pub email: String,
    /// 검증 시점의 사용자 역할
    pub role: Role,
}

impl From<TokenClaims> for AuthenticatedClaims {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedClaims {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedClaims>() {
            Some(claims) => ready(Ok(claims.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 게이트가 요구하는 역할 집합
///
/// 비어 있으면 "인증만 요구"를 의미합니다.
#[derive(Debug, Clone, Default)]
pub struct RequiredRoles(pub Vec<Role>);

impl RequiredRoles {
    /// 인증만 요구하는 (역할 제한 없는) 집합
    pub fn any_authenticated() -> Self {
        Self(Vec::new())
    }

    pub fn of(roles: &[Role]) -> Self {
        Self(roles.to_vec())
    }

    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}
