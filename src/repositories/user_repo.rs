//! # 사용자 리포지토리 구현
//!
//! [`UserDirectory`] 인터페이스의 MongoDB 구현체입니다. Redis를 통한
//! 단기 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! 인증 게이트가 보호된 요청마다 사용자 상태를 재조회하므로, ID/이메일
//! 조회 결과를 Redis에 캐싱합니다. 캐시 항목의 TTL은 **액세스 토큰
//! 수명을 절대 넘지 않도록** 잘라냅니다(clamp). 액세스 토큰보다 오래 사는
//! 캐시는 차단된 계정이 토큰 수명 너머까지 통과하는 구멍이 되기 때문입니다.
//! 모든 쓰기 연산은 해당 사용자의 캐시 키를 즉시 무효화합니다.
//!
//! - 캐시 키: `user:{id}`, `user:email:{email}`
//! - 캐시 실패: DB 직접 조회로 폴백 (요청 실패 없음)
//!
//! ## 인덱스
//!
//! `email`에 유니크 인덱스를 생성하여 중복 가입을 저장소 차원에서도
//! 차단합니다.

use crate::{
    caching::redis::RedisClient,
    db::Database,
    domain::entities::user::User,
    errors::AppError,
    repositories::UserDirectory,
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use std::sync::Arc;

/// 기본 캐시 TTL (초). 액세스 토큰 수명이 더 짧으면 그 값으로 잘립니다.
const DEFAULT_CACHE_TTL_SECS: u64 = 600;

const COLLECTION_NAME: &str = "users";

/// 사용자 데이터 액세스 리포지토리 (MongoDB + Redis)
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
    /// 캐시 TTL (초), 액세스 토큰 수명으로 제한됨
    cache_ttl_secs: u64,
}

impl UserRepository {
    /// 리포지토리 생성
    ///
    /// `access_token_ttl_secs`는 캐시 TTL의 상한으로 쓰입니다.
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>, access_token_ttl_secs: i64) -> Self {
        let cache_ttl_secs = DEFAULT_CACHE_TTL_SECS.min(access_token_ttl_secs.max(0) as u64);

        Self {
            db,
            redis,
            cache_ttl_secs,
        }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.db.collection::<User>(COLLECTION_NAME)
    }

    fn id_cache_key(id: &str) -> String {
        format!("user:{}", id)
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    /// 해당 사용자의 모든 캐시 키 무효화
    async fn invalidate_cache(&self, user: &User) {
        let mut keys = vec![Self::email_cache_key(&user.email)];
        if let Some(id) = user.id_string() {
            keys.push(Self::id_cache_key(&id));
        }

        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("사용자 캐시 무효화 실패: {}", e);
        }
    }

    async fn cache_user(&self, key: &str, user: &User) {
        if self.cache_ttl_secs == 0 {
            return;
        }
        if let Err(e) = self
            .redis
            .set_with_expiry(key, user, self.cache_ttl_secs)
            .await
        {
            log::debug!("사용자 캐시 저장 실패: {}", e);
        }
    }

    /// 사용자 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        // 캐시에서 먼저 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = Self::id_cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인 (유니크 인덱스가 최종 방어선)
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User, AppError> {
        let id = user.id_string().ok_or(AppError::UserNotFound)?;
        let object_id = ObjectId::parse_str(&id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": object_id }, user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::UserNotFound);
        }

        // 저장 직후 캐시 무효화. 게이트가 이전 상태를 보지 못하도록
        self.invalidate_cache(user).await;

        Ok(user.clone())
    }

    async fn count_all(&self) -> Result<u64, AppError> {
        self.collection()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
