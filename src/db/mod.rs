//! MongoDB 연결 래퍼
//!
//! 클라이언트와 데이터베이스 이름을 소유하고, 타입이 지정된 컬렉션 핸들을
//! 제공합니다. 연결 정보는 [`crate::config::DatabaseConfig`]로 주입받습니다.

use crate::config::DatabaseConfig;
use log::info;
use mongodb::{options::ClientOptions, Client};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// MongoDB에 연결하고 ping으로 가용성을 확인합니다.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some("tour_management_backend".to_string());

        let client = Client::with_options(client_options)?;

        // 연결 테스트
        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 이름으로 타입 지정 컬렉션 핸들을 얻습니다.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> mongodb::Collection<T> {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
