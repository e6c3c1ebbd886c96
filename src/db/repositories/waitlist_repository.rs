use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::models::WaitlistEntry;

#[derive(Debug, Clone)]
pub enum JoinOutcome {
    Joined(WaitlistEntry),
    AlreadyListed(WaitlistEntry),
}

/// Waitlist keyed by normalized email address.
#[derive(Clone, Default)]
pub struct WaitlistRepository {
    entries: Arc<DashMap<String, WaitlistEntry>>,
}

impl WaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, email: &str) -> JoinOutcome {
        let key = email.trim().to_lowercase();
        match self.entries.entry(key.clone()) {
            Entry::Occupied(existing) => JoinOutcome::AlreadyListed(existing.get().clone()),
            Entry::Vacant(slot) => {
                let entry = WaitlistEntry::new(key);
                slot.insert(entry.clone());
                JoinOutcome::Joined(entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaitlistStatus;

    #[test]
    fn test_join_is_idempotent_per_email() {
        let repo = WaitlistRepository::new();

        let first = repo.join("Reader@Example.com");
        let JoinOutcome::Joined(entry) = first else {
            panic!("first signup should join");
        };
        assert_eq!(entry.email, "reader@example.com");
        assert_eq!(entry.status, WaitlistStatus::Pending);

        let JoinOutcome::AlreadyListed(existing) = repo.join(" reader@example.com ") else {
            panic!("second signup should find the first entry");
        };
        assert_eq!(existing.id, entry.id);
    }
}
