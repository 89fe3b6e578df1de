use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, BasketTypeRepository, EventRepository, InventoryRepository,
    NotificationRepository, ReservationRepository, TimeSlotRepository,
    UserRepository, VolunteerRepository,
};
use crate::domain::services::{
    auth_service::AuthService, notification_service::NotificationService,
    reservation_service::ReservationService, volunteer_service::VolunteerService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub time_slot_repo: Arc<dyn TimeSlotRepository>,
    pub basket_type_repo: Arc<dyn BasketTypeRepository>,
    pub inventory_repo: Arc<dyn InventoryRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub volunteer_repo: Arc<dyn VolunteerRepository>,
    pub auth_service: Arc<AuthService>,
    pub notification_service: Arc<NotificationService>,
    pub reservation_service: Arc<ReservationService>,
    pub volunteer_service: Arc<VolunteerService>,
}
