pub mod auth;
pub mod basket_type;
pub mod event;
pub mod inventory;
pub mod notification;
pub mod reservation;
pub mod time_slot;
pub mod user;
pub mod volunteer;
