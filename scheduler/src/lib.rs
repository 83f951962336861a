// Campaign post scheduling: distribution engine and orchestration service

pub mod clock;
pub mod distribution;
pub mod ids;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use distribution::{DistributionStrategy, NaiveDistribution};
pub use ids::{IdGenerator, UuidIdGenerator};
pub use service::ScheduleService;
