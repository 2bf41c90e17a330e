//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 베어러 토큰을 검증하고, 사용자의 현재
//! 상태를 디렉터리에서 재확인한 뒤, 요구 역할 집합을 검사합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use crate::domain::entities::user::Role;
use crate::domain::models::auth::RequiredRoles;
use crate::middlewares::auth_inner::AuthGateService;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

/// JWT 인증 미들웨어
///
/// 요구 역할 집합이 비어 있으면 "인증만 요구"를 의미합니다.
pub struct AuthMiddleware {
    required_roles: RequiredRoles,
}

impl AuthMiddleware {
    /// 인증만 요구하는 (역할 제한 없는) 미들웨어 생성
    pub fn authenticated() -> Self {
        Self {
            required_roles: RequiredRoles::any_authenticated(),
        }
    }

    /// 나열된 역할 중 하나를 요구하는 미들웨어 생성
    pub fn roles(roles: &[Role]) -> Self {
        Self {
            required_roles: RequiredRoles::of(roles),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
        }))
    }
}
