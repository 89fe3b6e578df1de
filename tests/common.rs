use pantry_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_basket_type_repo::SqliteBasketTypeRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_inventory_repo::SqliteInventoryRepo,
        sqlite_notification_repo::SqliteNotificationRepo,
        sqlite_reservation_repo::SqliteReservationRepo,
        sqlite_time_slot_repo::SqliteTimeSlotRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_volunteer_repo::SqliteVolunteerRepo,
    },
    domain::models::user::{NewUserParams, User},
    domain::services::{
        auth_service::AuthService, notification_service::NotificationService,
        reservation_service::ReservationService, volunteer_service::VolunteerService,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tower::ServiceExt;
use serde_json::Value;

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let time_slot_repo = Arc::new(SqliteTimeSlotRepo::new(pool.clone()));
        let basket_type_repo = Arc::new(SqliteBasketTypeRepo::new(pool.clone()));
        let inventory_repo = Arc::new(SqliteInventoryRepo::new(pool.clone()));
        let reservation_repo = Arc::new(SqliteReservationRepo::new(pool.clone()));
        let notification_repo = Arc::new(SqliteNotificationRepo::new(pool.clone()));
        let volunteer_repo = Arc::new(SqliteVolunteerRepo::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let notification_service = Arc::new(NotificationService::new(
            notification_repo.clone(),
            user_repo.clone(),
        ));
        let reservation_service = Arc::new(ReservationService::new(
            reservation_repo.clone(),
            time_slot_repo.clone(),
            event_repo.clone(),
            basket_type_repo.clone(),
            inventory_repo.clone(),
            user_repo.clone(),
            notification_service.clone(),
        ));
        let volunteer_service = Arc::new(VolunteerService::new(
            volunteer_repo.clone(),
            time_slot_repo.clone(),
            user_repo.clone(),
            notification_service.clone(),
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo,
            auth_repo,
            event_repo,
            time_slot_repo,
            basket_type_repo,
            inventory_repo,
            reservation_repo,
            notification_repo,
            volunteer_repo,
            auth_service,
            notification_service,
            reservation_service,
            volunteer_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Inserts a user directly so tests can control role and status without
    /// going through the approval flow. Students come out id-verified.
    pub async fn seed_user(&self, email: &str, password: &str, role: &str, status: &str) -> User {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let mut user = User::new(NewUserParams {
            email: email.to_string(),
            password_hash,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            role: role.to_string(),
            school: None,
        });
        user.status = status.to_string();
        user.student_id_verified = true;

        self.state.user_repo.create(&user).await.unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    pub async fn get(&self, uri: &str, auth: &AuthHeaders) -> (axum::http::StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        auth: &AuthHeaders,
        payload: Value,
    ) -> (axum::http::StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", auth.csrf_token.clone())
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post(&self, uri: &str, auth: &AuthHeaders, payload: Value) -> (axum::http::StatusCode, Value) {
        self.send_json("POST", uri, auth, payload).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
