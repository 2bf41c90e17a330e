//! 슈퍼 관리자 시드
//!
//! 서버 기동 시 설정된 슈퍼 관리자 계정이 없으면 생성합니다.
//! 이미 존재하면 아무것도 하지 않습니다.

use crate::{
    config::SuperAdminConfig,
    domain::entities::user::{Role, User},
    errors::AppResult,
    repositories::UserDirectory,
    services::PasswordHasher,
};

pub async fn seed_super_admin(
    config: &SuperAdminConfig,
    directory: &dyn UserDirectory,
    hasher: &PasswordHasher,
) -> AppResult<()> {
    if directory.find_by_email(&config.email).await?.is_some() {
        log::info!("슈퍼 관리자 계정이 이미 존재합니다");
        return Ok(());
    }

    log::info!("슈퍼 관리자 계정 생성 중: {}", config.email);

    let password_hash = hasher.hash(&config.password)?;

    let mut user = User::new_credentials(
        "Super Admin".to_string(),
        config.email.clone(),
        password_hash,
    );
    user.role = Role::SuperAdmin;
    user.is_verified = true;

    directory.create(user).await?;

    log::info!("슈퍼 관리자 계정 생성 완료");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordConfig;
    use crate::repositories::testing::InMemoryUserDirectory;
    use crate::repositories::UserDirectory;

    fn config() -> SuperAdminConfig {
        SuperAdminConfig {
            email: "admin@tourhub.dev".to_string(),
            password: "ChangeMe123!".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_seed_creates_verified_super_admin() {
        let directory = InMemoryUserDirectory::new();
        let hasher = PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 });

        seed_super_admin(&config(), &directory, &hasher).await.unwrap();

        let admin = directory
            .find_by_email("admin@tourhub.dev")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::SuperAdmin);
        assert!(admin.is_verified);
        assert_ne!(admin.password_hash.as_deref(), Some("ChangeMe123!"));
    }

    #[actix_web::test]
    async fn test_seed_is_idempotent() {
        let directory = InMemoryUserDirectory::new();
        let hasher = PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 });

        seed_super_admin(&config(), &directory, &hasher).await.unwrap();
        seed_super_admin(&config(), &directory, &hasher).await.unwrap();

        assert_eq!(directory.count_all().await.unwrap(), 1);
    }
}
