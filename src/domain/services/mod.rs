pub mod auth_service;
pub mod notification_service;
pub mod reservation_service;
pub mod volunteer_service;
