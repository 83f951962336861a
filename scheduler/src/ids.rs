// Schedule token generation

use uuid::Uuid;

/// Generator for globally unique schedule tokens
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier
    fn generate(&self) -> Uuid;
}

/// Random v4 UUID generator
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
