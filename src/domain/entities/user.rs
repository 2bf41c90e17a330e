//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 자격증명(이메일/비밀번호) 인증과 OAuth 인증을 모두 지원하는 통합된
//! 사용자 모델을 제공합니다. 계정은 물리적으로 삭제되지 않으며
//! `is_deleted` 플래그로만 표시됩니다.

use crate::errors::AppError;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 닫힌 열거형으로, 모든 게이트 검사에서 완전 매칭(exhaustive match)으로
/// 비교됩니다. 문자열 비교는 사용하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
    Guide,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Guide => "GUIDE",
        }
    }

    /// 관리자 권한(역할/상태 변경 등)을 갖는 역할인지
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

/// 계정 활동 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Active,
    Inactive,
    Blocked,
}

/// 인증 프로바이더 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    Credentials,
    Google,
}

/// 계정에 연결된 인증 수단
///
/// 한 계정에 프로바이더 종류별로 여러 개가 연결될 수 있습니다
/// (예: credentials + google).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthProviderLink {
    pub provider: AuthProviderKind,
    pub provider_id: String,
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이름
    pub name: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 해시된 비밀번호 (OAuth 전용 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// 사용자 역할
    pub role: Role,
    /// 계정 활동 상태
    pub is_active: ActivityStatus,
    /// 소프트 삭제 플래그 (물리 삭제 없음)
    pub is_deleted: bool,
    /// 이메일 인증 여부 (OAuth 사용자는 기본적으로 true)
    pub is_verified: bool,
    /// 연결된 인증 수단 목록
    pub auths: Vec<AuthProviderLink>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 자격증명(이메일/비밀번호) 사용자 생성
    pub fn new_credentials(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();
        let link = AuthProviderLink {
            provider: AuthProviderKind::Credentials,
            provider_id: email.clone(),
        };

        Self {
            id: None,
            name,
            email,
            password_hash: Some(password_hash),
            phone: None,
            picture: None,
            address: None,
            role: Role::User,
            is_active: ActivityStatus::Active,
            is_deleted: false,
            is_verified: false,
            auths: vec![link],
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// 프로바이더가 이메일을 이미 검증했으므로 인증 완료 상태로 시작합니다.
    pub fn new_oauth(
        name: String,
        email: String,
        provider: AuthProviderKind,
        provider_id: String,
        picture: Option<String>,
    ) -> Self {
        let now = DateTime::now();
        let link = AuthProviderLink {
            provider,
            provider_id,
        };

        Self {
            id: None,
            name,
            email,
            password_hash: None,
            phone: None,
            picture,
            address: None,
            role: Role::User,
            is_active: ActivityStatus::Active,
            is_deleted: false,
            is_verified: true,
            auths: vec![link],
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 특정 종류의 프로바이더가 연결되어 있는지 확인
    pub fn has_provider(&self, kind: AuthProviderKind) -> bool {
        self.auths.iter().any(|link| link.provider == kind)
    }

    /// 프로바이더 연결 추가 (이미 같은 종류가 있으면 무시)
    pub fn link_provider(&mut self, link: AuthProviderLink) {
        if !self.has_provider(link.provider) {
            self.auths.push(link);
        }
    }

    /// 계정 상태 게이트
    ///
    /// 차단/비활성 상태이면 `UserBlocked`, 소프트 삭제 상태이면 `UserDeleted`를
    /// 반환합니다. 로그인, 리프레시 회전, 요청 게이트가 모두 이 검사를
    /// 공유합니다. 검사 순서(상태 → 삭제)는 에러 우선순위의 일부입니다.
    pub fn ensure_active(&self) -> Result<(), AppError> {
        match self.is_active {
            ActivityStatus::Blocked | ActivityStatus::Inactive => return Err(AppError::UserBlocked),
            ActivityStatus::Active => {}
        }

        if self.is_deleted {
            return Err(AppError::UserDeleted);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credentials_user_defaults() {
        let user = User::new_credentials(
            "홍길동".to_string(),
            "hong@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.role, Role::User);
        assert_eq!(user.is_active, ActivityStatus::Active);
        assert!(!user.is_deleted);
        assert!(!user.is_verified);
        assert!(user.can_authenticate_with_password());
        assert!(user.has_provider(AuthProviderKind::Credentials));
        assert_eq!(user.auths[0].provider_id, "hong@example.com");
    }

    #[test]
    fn test_new_oauth_user_is_verified_without_password() {
        let user = User::new_oauth(
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            AuthProviderKind::Google,
            "google-uid-123".to_string(),
            None,
        );

        assert!(user.is_verified);
        assert!(!user.can_authenticate_with_password());
        assert!(user.has_provider(AuthProviderKind::Google));
    }

    #[test]
    fn test_link_provider_is_idempotent_per_kind() {
        let mut user = User::new_credentials(
            "홍길동".to_string(),
            "hong@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        user.link_provider(AuthProviderLink {
            provider: AuthProviderKind::Google,
            provider_id: "g-1".to_string(),
        });
        user.link_provider(AuthProviderLink {
            provider: AuthProviderKind::Google,
            provider_id: "g-2".to_string(),
        });

        assert_eq!(user.auths.len(), 2);
        assert_eq!(
            user.auths
                .iter()
                .filter(|l| l.provider == AuthProviderKind::Google)
                .count(),
            1
        );
    }

    #[test]
    fn test_ensure_active_gate_ordering() {
        let mut user = User::new_credentials(
            "홍길동".to_string(),
            "hong@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        assert!(user.ensure_active().is_ok());

        // 차단 + 삭제가 동시일 때는 상태 검사가 먼저
        user.is_active = ActivityStatus::Blocked;
        user.is_deleted = true;
        assert!(matches!(user.ensure_active(), Err(AppError::UserBlocked)));

        user.is_active = ActivityStatus::Active;
        assert!(matches!(user.ensure_active(), Err(AppError::UserDeleted)));

        user.is_deleted = false;
        user.is_active = ActivityStatus::Inactive;
        assert!(matches!(user.ensure_active(), Err(AppError::UserBlocked)));
    }

    #[test]
    fn test_role_serialization_is_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"SUPER_ADMIN\""
        );
        assert_eq!(serde_json::to_string(&Role::Guide).unwrap(), "\"GUIDE\"");
        assert_eq!(
            serde_json::from_str::<ActivityStatus>("\"BLOCKED\"").unwrap(),
            ActivityStatus::Blocked
        );
        assert_eq!(
            serde_json::from_str::<AuthProviderKind>("\"credentials\"").unwrap(),
            AuthProviderKind::Credentials
        );
    }
}
