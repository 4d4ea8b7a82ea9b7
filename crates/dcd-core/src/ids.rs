use uuid::Uuid;

/// Stable identifier for every persisted entity.
pub type Id = Uuid;

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type ProjectId = Id;
pub type CaseId = Id;
pub type AssetId = Id;
pub type WellId = Id;
pub type ProfileId = Id;

/// Allocate a fresh random id.
pub fn new_id() -> Id {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_differ() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(!a.is_nil());
    }
}
