use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{
    AuthRepository, BasketTypeRepository, EventRepository, InventoryRepository,
    NotificationRepository, ReservationRepository, TimeSlotRepository,
    UserRepository, VolunteerRepository,
};
use crate::domain::services::{
    auth_service::AuthService, notification_service::NotificationService,
    reservation_service::ReservationService, volunteer_service::VolunteerService,
};
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_basket_type_repo::PostgresBasketTypeRepo,
    postgres_event_repo::PostgresEventRepo, postgres_inventory_repo::PostgresInventoryRepo,
    postgres_notification_repo::PostgresNotificationRepo,
    postgres_reservation_repo::PostgresReservationRepo,
    postgres_time_slot_repo::PostgresTimeSlotRepo, postgres_user_repo::PostgresUserRepo,
    postgres_volunteer_repo::PostgresVolunteerRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_basket_type_repo::SqliteBasketTypeRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_inventory_repo::SqliteInventoryRepo,
    sqlite_notification_repo::SqliteNotificationRepo,
    sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_time_slot_repo::SqliteTimeSlotRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_volunteer_repo::SqliteVolunteerRepo,
};

struct Repos {
    user_repo: Arc<dyn UserRepository>,
    auth_repo: Arc<dyn AuthRepository>,
    event_repo: Arc<dyn EventRepository>,
    time_slot_repo: Arc<dyn TimeSlotRepository>,
    basket_type_repo: Arc<dyn BasketTypeRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    volunteer_repo: Arc<dyn VolunteerRepository>,
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let repos = Repos {
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo: Arc::new(PostgresAuthRepo::new(pool.clone())),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            time_slot_repo: Arc::new(PostgresTimeSlotRepo::new(pool.clone())),
            basket_type_repo: Arc::new(PostgresBasketTypeRepo::new(pool.clone())),
            inventory_repo: Arc::new(PostgresInventoryRepo::new(pool.clone())),
            reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
            notification_repo: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            volunteer_repo: Arc::new(PostgresVolunteerRepo::new(pool.clone())),
        };

        wire_state(config, repos)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let repos = Repos {
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo: Arc::new(SqliteAuthRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            time_slot_repo: Arc::new(SqliteTimeSlotRepo::new(pool.clone())),
            basket_type_repo: Arc::new(SqliteBasketTypeRepo::new(pool.clone())),
            inventory_repo: Arc::new(SqliteInventoryRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            notification_repo: Arc::new(SqliteNotificationRepo::new(pool.clone())),
            volunteer_repo: Arc::new(SqliteVolunteerRepo::new(pool.clone())),
        };

        wire_state(config, repos)
    }
}

fn wire_state(config: &Config, repos: Repos) -> AppState {
    let auth_service = Arc::new(AuthService::new(repos.auth_repo.clone(), config.clone()));
    let notification_service = Arc::new(NotificationService::new(
        repos.notification_repo.clone(),
        repos.user_repo.clone(),
    ));
    let reservation_service = Arc::new(ReservationService::new(
        repos.reservation_repo.clone(),
        repos.time_slot_repo.clone(),
        repos.event_repo.clone(),
        repos.basket_type_repo.clone(),
        repos.inventory_repo.clone(),
        repos.user_repo.clone(),
        notification_service.clone(),
    ));
    let volunteer_service = Arc::new(VolunteerService::new(
        repos.volunteer_repo.clone(),
        repos.time_slot_repo.clone(),
        repos.user_repo.clone(),
        notification_service.clone(),
    ));

    AppState {
        config: config.clone(),
        user_repo: repos.user_repo,
        auth_repo: repos.auth_repo,
        event_repo: repos.event_repo,
        time_slot_repo: repos.time_slot_repo,
        basket_type_repo: repos.basket_type_repo,
        inventory_repo: repos.inventory_repo,
        reservation_repo: repos.reservation_repo,
        notification_repo: repos.notification_repo,
        volunteer_repo: repos.volunteer_repo,
        auth_service,
        notification_service,
        reservation_service,
        volunteer_service,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
