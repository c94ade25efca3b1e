pub mod subscribers_model;
pub mod subscribers_repository;
pub mod subscribers_service;
pub mod subscribers_traits;

pub use subscribers_model::{NewSubscriber, Subscriber};
pub use subscribers_repository::SubscriberRepository;
pub use subscribers_service::SubscriberService;
pub use subscribers_traits::SubscriberRepositoryTrait;
