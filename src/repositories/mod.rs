//! 데이터 액세스 계층
//!
//! 사용자 저장소는 [`UserDirectory`] 트레잇 뒤에 숨겨진 외부 협력자입니다.
//! 서비스와 인증 게이트는 이 인터페이스만 알고, 실제 MongoDB + Redis 구현은
//! [`user_repo::UserRepository`]가 담당합니다.

pub mod user_repo;

pub use user_repo::UserRepository;

use crate::domain::entities::user::User;
use crate::errors::AppError;
use async_trait::async_trait;

/// 사용자 디렉터리 인터페이스
///
/// 모든 연산은 단건 조회/저장 단위로 원자적이며, 암묵적인 재시도는 없습니다.
/// 조회 연산은 부재를 `Ok(None)`으로 신호하고, 존재가 전제인 연산만
/// 에러를 반환합니다.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 이메일로 사용자 조회
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// ID(ObjectId 16진수 문자열)로 사용자 조회
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자 생성
    ///
    /// 동일 이메일의 계정이 이미 있으면 `UserAlreadyExists`를 반환합니다.
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// 기존 사용자 문서 전체 저장 (ID 기준 치환)
    ///
    /// 대상이 없으면 `UserNotFound`를 반환합니다.
    async fn save(&self, user: &User) -> Result<User, AppError>;

    /// 전체 사용자 수
    async fn count_all(&self) -> Result<u64, AppError>;

    /// 전체 사용자 목록
    async fn find_all(&self) -> Result<Vec<User>, AppError>;
}

#[cfg(test)]
pub mod testing {
    //! 테스트용 인메모리 디렉터리 구현

    use super::*;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Mutex;

    /// 서비스/게이트 로직 테스트에 쓰이는 인메모리 [`UserDirectory`]
    pub struct InMemoryUserDirectory {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserDirectory {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }
    }

    impl Default for InMemoryUserDirectory {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl UserDirectory for InMemoryUserDirectory {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|u| u.id_string().as_deref() == Some(id))
                .cloned())
        }

        async fn create(&self, mut user: User) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(AppError::UserAlreadyExists);
            }
            user.id = Some(ObjectId::new());
            users.push(user.clone());
            Ok(user)
        }

        async fn save(&self, user: &User) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            let id = user.id_string().ok_or(AppError::UserNotFound)?;
            match users
                .iter_mut()
                .find(|u| u.id_string().as_deref() == Some(id.as_str()))
            {
                Some(existing) => {
                    *existing = user.clone();
                    Ok(user.clone())
                }
                None => Err(AppError::UserNotFound),
            }
        }

        async fn count_all(&self) -> Result<u64, AppError> {
            Ok(self.users.lock().unwrap().len() as u64)
        }

        async fn find_all(&self) -> Result<Vec<User>, AppError> {
            Ok(self.users.lock().unwrap().clone())
        }
    }
}
