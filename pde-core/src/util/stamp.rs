use crate::entities::*;

/// Bumps the modification time of an entity
/// before it is persisted.
pub trait Stamp {
    fn stamp_updated(self, now: Timestamp) -> Self;
}

impl Stamp for Tip {
    fn stamp_updated(self, now: Timestamp) -> Self {
        Self {
            updated_at: now,
            ..self
        }
    }
}

impl Stamp for Community {
    fn stamp_updated(self, now: Timestamp) -> Self {
        Self {
            updated_at: now,
            ..self
        }
    }
}
