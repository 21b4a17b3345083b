use redis::{AsyncCommands, Client};
use shared::config::RedisConfig;
use shared::error::AppResult;

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn.get(key).await?)
    }

    pub async fn try_connect(&self) -> AppResult<()> {
        let _ = self.get("connection_check").await?;
        Ok(())
    }
}
