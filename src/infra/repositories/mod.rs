pub mod postgres_auth_repo;
pub mod postgres_basket_type_repo;
pub mod postgres_event_repo;
pub mod postgres_inventory_repo;
pub mod postgres_notification_repo;
pub mod postgres_reservation_repo;
pub mod postgres_time_slot_repo;
pub mod postgres_user_repo;
pub mod postgres_volunteer_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_basket_type_repo;
pub mod sqlite_event_repo;
pub mod sqlite_inventory_repo;
pub mod sqlite_notification_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_time_slot_repo;
pub mod sqlite_user_repo;
pub mod sqlite_volunteer_repo;
