// Repository layer for database operations

pub mod brand;
pub mod campaign;
pub mod post;
pub mod schedule;

pub use brand::BrandRepository;
pub use campaign::CampaignRepository;
pub use post::PostRepository;
pub use schedule::ScheduleRepository;
