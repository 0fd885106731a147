//! In-memory user store and domain errors.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user {id} not found")]
    NotFound { id: u64 },

    #[error("user with email '{email}' already exists")]
    EmailTaken { email: String },
}

/// Process-local user store. A `BTreeMap` keeps listing order stable.
#[derive(Default)]
pub struct Store {
    seq: AtomicU64,
    users: RwLock<BTreeMap<u64, User>>,
}

impl Store {
    pub fn create(&self, email: String, display_name: String) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == email) {
            return Err(DomainError::EmailTaken { email });
        }
        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let user = User {
            id,
            email,
            display_name,
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    pub fn get(&self, id: u64) -> Result<User, DomainError> {
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound { id })
    }

    pub fn update(
        &self,
        id: u64,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if let Some(email) = &email {
            if users.values().any(|u| u.email == *email && u.id != id) {
                return Err(DomainError::EmailTaken {
                    email: email.clone(),
                });
            }
        }
        let user = users.get_mut(&id).ok_or(DomainError::NotFound { id })?;
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(display_name) = display_name {
            user.display_name = display_name;
        }
        Ok(user.clone())
    }

    pub fn remove(&self, id: u64) -> Result<User, DomainError> {
        self.users
            .write()
            .remove(&id)
            .ok_or(DomainError::NotFound { id })
    }

    pub fn list(&self, limit: usize, offset: usize) -> (Vec<User>, usize) {
        let users = self.users.read();
        let total = users.len();
        let page = users.values().skip(offset).take(limit).cloned().collect();
        (page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_email() {
        let store = Store::default();
        store.create("a@x.io".into(), "A".into()).unwrap();
        let err = store.create("a@x.io".into(), "B".into()).unwrap_err();
        assert!(matches!(err, DomainError::EmailTaken { .. }));
    }

    #[test]
    fn ids_are_sequential_and_listing_pages() {
        let store = Store::default();
        for i in 0..5 {
            store
                .create(format!("u{i}@x.io"), format!("U{i}"))
                .unwrap();
        }
        let (page, total) = store.list(2, 2);
        assert_eq!(total, 5);
        assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn update_and_remove_round_trip() {
        let store = Store::default();
        let user = store.create("a@x.io".into(), "A".into()).unwrap();
        let updated = store
            .update(user.id, None, Some("Anna".into()))
            .unwrap();
        assert_eq!(updated.display_name, "Anna");
        store.remove(user.id).unwrap();
        assert!(matches!(
            store.get(user.id),
            Err(DomainError::NotFound { .. })
        ));
    }
}
