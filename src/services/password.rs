//! 비밀번호 해싱 서비스
//!
//! bcrypt 기반의 단방향 해시 생성과 대조를 담당합니다. cost는
//! [`crate::config::PasswordConfig`]로 주입되며, 환경별로 다른 값을
//! 사용합니다. 평문 비밀번호는 어떤 경로로도 로그에 남기거나 저장하지
//! 않습니다. 해시 대조는 bcrypt 자체의 비교기에 위임합니다.

use crate::config::PasswordConfig;
use crate::errors::AppError;

/// bcrypt 해시 생성/대조기
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// 평문을 솔트 포함 해시로 변환
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 평문과 저장된 해시의 일치 여부 확인
    pub fn matches(&self, plaintext: &str, digest: &str) -> Result<bool, AppError> {
        bcrypt::verify(plaintext, digest)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        // 테스트에서는 최소 cost 사용
        PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 })
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = hasher();
        let digest = hasher.hash("Abc12345!").unwrap();

        assert_ne!(digest, "Abc12345!");
        assert!(!digest.contains("Abc12345!"));
        assert!(digest.starts_with("$2"));
    }

    #[test]
    fn test_matches_round_trip() {
        let hasher = hasher();
        let digest = hasher.hash("Abc12345!").unwrap();

        assert!(hasher.matches("Abc12345!", &digest).unwrap());
        assert!(!hasher.matches("wrong-password", &digest).unwrap());
    }

    #[test]
    fn test_same_plaintext_yields_different_digests() {
        // 솔트가 매번 새로 생성되는지 확인
        let hasher = hasher();
        let first = hasher.hash("Abc12345!").unwrap();
        let second = hasher.hash("Abc12345!").unwrap();

        assert_ne!(first, second);
        assert!(hasher.matches("Abc12345!", &first).unwrap());
        assert!(hasher.matches("Abc12345!", &second).unwrap());
    }
}
