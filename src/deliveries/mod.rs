pub mod deliveries_model;
pub mod deliveries_repository;
pub mod deliveries_traits;

pub use deliveries_model::{DeliveryRecord, NewDeliveryRecord};
pub use deliveries_repository::DeliveryRepository;
pub use deliveries_traits::DeliveryRepositoryTrait;
