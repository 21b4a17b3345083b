use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::enrollment::EnrollmentRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::room::RoomRepositoryImpl;
use kernel::repository::auth::AuthRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::service::booking::BookingService;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    booking_service: Arc<BookingService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(redis_client.clone()));
        let booking_service = Arc::new(BookingService::new(
            Arc::new(BookingRepositoryImpl::new(pool.clone())),
            Arc::new(RoomRepositoryImpl::new(pool.clone())),
            Arc::new(EnrollmentRepositoryImpl::new(pool.clone())),
        ));
        Self {
            health_check_repository,
            auth_repository,
            booking_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }
}
