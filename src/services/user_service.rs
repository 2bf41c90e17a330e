//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생성, 조회, 수정을 담당하는 비즈니스 로직입니다.
//! 계정 삭제는 물리 삭제가 아니라 `is_deleted` 플래그 설정(수정 연산)으로
//! 처리됩니다.
//!
//! ## 권한 규칙
//!
//! - 회원가입은 공개 연산이며 역할은 항상 `USER`로 시작합니다.
//! - 일반 사용자는 자신의 프로필 필드(이름, 연락처, 주소, 비밀번호)만
//!   수정할 수 있습니다.
//! - `role`, `is_active`, `is_deleted`, `is_verified`는 관리자
//!   (ADMIN / SUPER_ADMIN) 전용 필드입니다.

use crate::{
    domain::dto::request::{CreateUserRequest, UpdateUserRequest},
    domain::dto::response::{Meta, UserResponse},
    domain::entities::user::User,
    domain::models::auth::AuthenticatedClaims,
    errors::AppError,
    repositories::UserDirectory,
    services::PasswordHasher,
};
use mongodb::bson::DateTime;
use std::sync::Arc;

/// 사용자 관리 서비스
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: Arc<PasswordHasher>) -> Self {
        Self { directory, hasher }
    }

    /// 새 사용자 계정 생성 (자격증명 가입)
    ///
    /// # Errors
    ///
    /// * `AppError::UserAlreadyExists` - 동일 이메일의 계정이 이미 존재
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        if self.directory.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let mut user = User::new_credentials(request.name, request.email, password_hash);
        user.phone = request.phone;
        user.address = request.address;

        let created = self.directory.create(user).await?;

        log::info!("사용자 생성 완료: {}", created.email);

        Ok(UserResponse::from(created))
    }

    /// 전체 사용자 목록 조회 (관리자 전용 라우트에서 사용)
    pub async fn get_all_users(&self) -> Result<(Vec<UserResponse>, Meta), AppError> {
        let users = self.directory.find_all().await?;
        let total = self.directory.count_all().await?;

        let data = users.into_iter().map(UserResponse::from).collect();

        Ok((data, Meta { total }))
    }

    /// 사용자 정보 수정
    ///
    /// # 권한 검사
    ///
    /// * 관리자 전용 필드(`role`, `is_active`, `is_deleted`, `is_verified`)를
    ///   포함한 요청은 관리자만 수행 가능 → `PermissionDenied`
    /// * 일반 사용자는 자기 자신만 수정 가능 → `PermissionDenied`
    pub async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
        actor: &AuthenticatedClaims,
    ) -> Result<UserResponse, AppError> {
        let wants_admin_fields = request.role.is_some()
            || request.is_active.is_some()
            || request.is_deleted.is_some()
            || request.is_verified.is_some();

        if wants_admin_fields && !actor.role.is_admin() {
            log::warn!(
                "관리자 필드 수정 시도 거부: 사용자 {} (역할 {:?})",
                actor.user_id,
                actor.role
            );
            return Err(AppError::PermissionDenied);
        }

        if !actor.role.is_admin() && actor.user_id != id {
            return Err(AppError::PermissionDenied);
        }

        let mut user = self
            .directory
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(password) = request.password {
            user.password_hash = Some(self.hasher.hash(&password)?);
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = request.address {
            user.address = Some(address);
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        if let Some(is_deleted) = request.is_deleted {
            user.is_deleted = is_deleted;
        }
        if let Some(is_verified) = request.is_verified {
            user.is_verified = is_verified;
        }

        user.updated_at = DateTime::now();

        let saved = self.directory.save(&user).await?;

        Ok(UserResponse::from(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordConfig;
    use crate::domain::entities::user::{ActivityStatus, AuthProviderKind, Role};
    use crate::repositories::testing::InMemoryUserDirectory;

    fn service() -> (UserService, Arc<InMemoryUserDirectory>) {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let hasher = Arc::new(PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 }));
        (UserService::new(directory.clone(), hasher), directory)
    }

    fn register_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "홍길동길동".to_string(),
            email: email.to_string(),
            password: "Abc12345!".to_string(),
            phone: None,
            address: None,
        }
    }

    fn admin_claims() -> AuthenticatedClaims {
        AuthenticatedClaims {
            user_id: "admin-id".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[actix_web::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (service, directory) = service();

        let response = service.create_user(register_request("a@x.com")).await.unwrap();
        assert_eq!(response.role, Role::User);
        assert!(response.auths.iter().any(|l| l.provider == AuthProviderKind::Credentials));

        let stored = directory.find_by_email("a@x.com").await.unwrap().unwrap();
        let digest = stored.password_hash.unwrap();
        assert_ne!(digest, "Abc12345!");
        assert!(!digest.contains("Abc12345!"));
    }

    #[actix_web::test]
    async fn test_duplicate_registration_fails() {
        let (service, _) = service();

        service.create_user(register_request("a@x.com")).await.unwrap();

        let result = service.create_user(register_request("a@x.com")).await;
        assert!(matches!(result, Err(AppError::UserAlreadyExists)));
    }

    #[actix_web::test]
    async fn test_get_all_users_includes_meta_total() {
        let (service, _) = service();

        service.create_user(register_request("a@x.com")).await.unwrap();
        service.create_user(register_request("b@x.com")).await.unwrap();

        let (users, meta) = service.get_all_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(meta.total, 2);
    }

    #[actix_web::test]
    async fn test_regular_user_cannot_touch_admin_fields() {
        let (service, _) = service();

        let created = service.create_user(register_request("a@x.com")).await.unwrap();

        let actor = AuthenticatedClaims {
            user_id: created.id.clone(),
            email: created.email.clone(),
            role: Role::User,
        };

        let request = UpdateUserRequest {
            role: Some(Role::Admin),
            ..Default::default()
        };

        let result = service.update_user(&created.id, request, &actor).await;
        assert!(matches!(result, Err(AppError::PermissionDenied)));
    }

    #[actix_web::test]
    async fn test_regular_user_cannot_update_others() {
        let (service, _) = service();

        let first = service.create_user(register_request("a@x.com")).await.unwrap();
        let second = service.create_user(register_request("b@x.com")).await.unwrap();

        let actor = AuthenticatedClaims {
            user_id: first.id.clone(),
            email: first.email.clone(),
            role: Role::User,
        };

        let request = UpdateUserRequest {
            name: Some("새이름입니다".to_string()),
            ..Default::default()
        };

        let result = service.update_user(&second.id, request, &actor).await;
        assert!(matches!(result, Err(AppError::PermissionDenied)));
    }

    #[actix_web::test]
    async fn test_admin_can_block_and_soft_delete() {
        let (service, directory) = service();

        let created = service.create_user(register_request("a@x.com")).await.unwrap();

        let request = UpdateUserRequest {
            is_active: Some(ActivityStatus::Blocked),
            is_deleted: Some(true),
            ..Default::default()
        };

        let updated = service
            .update_user(&created.id, request, &admin_claims())
            .await
            .unwrap();
        assert_eq!(updated.is_active, ActivityStatus::Blocked);
        assert!(updated.is_deleted);

        // 소프트 삭제: 문서는 여전히 존재
        let stored = directory.find_by_id(&created.id).await.unwrap();
        assert!(stored.is_some());
    }

    #[actix_web::test]
    async fn test_owner_can_update_own_profile() {
        let (service, _) = service();

        let created = service.create_user(register_request("a@x.com")).await.unwrap();
        let actor = AuthenticatedClaims {
            user_id: created.id.clone(),
            email: created.email.clone(),
            role: Role::User,
        };

        let request = UpdateUserRequest {
            name: Some("새이름입니다".to_string()),
            phone: Some("+82-10-1234-5678".to_string()),
            ..Default::default()
        };

        let updated = service
            .update_user(&created.id, request, &actor)
            .await
            .unwrap();
        assert_eq!(updated.name, "새이름입니다");
        assert_eq!(updated.phone.as_deref(), Some("+82-10-1234-5678"));
    }
}
