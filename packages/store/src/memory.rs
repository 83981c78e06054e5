use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::models::{Feedback, FeedbackDraft, NewUser, User};
use crate::repo::{FeedbackStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<String, User>,
    feedback: BTreeMap<i32, Feedback>,
    last_feedback_id: i32,
}

/// In-memory FeedbackStore for testing and local runs.
///
/// Both tables sit behind one mutex, so every method is a single critical section and
/// cascading deletes are atomic.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables()?;
        if tables.users.contains_key(&user.username) {
            return Err(StoreError::Conflict("users_pkey".to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users_email_key".to_string()));
        }
        let user = User::from(user);
        tables.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.tables()?.users.get(username).cloned())
    }

    async fn delete_user(&self, username: &str) -> StoreResult<bool> {
        let mut tables = self.tables()?;
        if tables.users.remove(username).is_none() {
            return Ok(false);
        }
        tables.feedback.retain(|_, f| f.username != username);
        Ok(true)
    }

    async fn list_feedback_for(&self, username: &str) -> StoreResult<Vec<Feedback>> {
        Ok(self
            .tables()?
            .feedback
            .values()
            .filter(|f| f.username == username)
            .cloned()
            .collect())
    }

    async fn insert_feedback(
        &self,
        username: &str,
        draft: FeedbackDraft,
    ) -> StoreResult<Feedback> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(username) {
            return Err(StoreError::UnknownOwner);
        }
        tables.last_feedback_id += 1;
        let feedback = Feedback {
            id: tables.last_feedback_id,
            title: draft.title,
            content: draft.content,
            username: username.to_string(),
        };
        tables.feedback.insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    async fn find_feedback(&self, id: i32) -> StoreResult<Option<Feedback>> {
        Ok(self.tables()?.feedback.get(&id).cloned())
    }

    async fn update_feedback(
        &self,
        id: i32,
        draft: FeedbackDraft,
    ) -> StoreResult<Option<Feedback>> {
        let mut tables = self.tables()?;
        Ok(tables.feedback.get_mut(&id).map(|f| {
            f.title = draft.title;
            f.content = draft.content;
            f.clone()
        }))
    }

    async fn delete_feedback(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables()?.feedback.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: email.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = MemoryStore::new();

        assert!(store.find_user("alice").await.unwrap().is_none());

        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();

        let user = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_conflict() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();

        let err = store
            .insert_user(new_user("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let err = store
            .insert_user(new_user("bob", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Original row untouched
        let user = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(store.find_user("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_feedback_ids_increase() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();

        let first = store
            .insert_feedback("alice", FeedbackDraft::new("one", "1"))
            .await
            .unwrap();
        let second = store
            .insert_feedback("alice", FeedbackDraft::new("two", "2"))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        // Ids are not reused after a delete
        assert!(store.delete_feedback(second.id).await.unwrap());
        let third = store
            .insert_feedback("alice", FeedbackDraft::new("three", "3"))
            .await
            .unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_insert_feedback_requires_owner() {
        let store = MemoryStore::new();
        let err = store
            .insert_feedback("ghost", FeedbackDraft::new("t", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownOwner));
    }

    #[tokio::test]
    async fn test_update_feedback() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();
        let fb = store
            .insert_feedback("alice", FeedbackDraft::new("old", "old body"))
            .await
            .unwrap();

        let updated = store
            .update_feedback(fb.id, FeedbackDraft::new("new", "new body"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.username, "alice");

        assert!(store
            .update_feedback(999, FeedbackDraft::new("x", "y"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();
        store.insert_user(new_user("bob", "b@x.com")).await.unwrap();
        let alice_fb = store
            .insert_feedback("alice", FeedbackDraft::new("a", "a"))
            .await
            .unwrap();
        let bob_fb = store
            .insert_feedback("bob", FeedbackDraft::new("b", "b"))
            .await
            .unwrap();

        assert!(store.delete_user("alice").await.unwrap());

        assert!(store.find_user("alice").await.unwrap().is_none());
        assert!(store.find_feedback(alice_fb.id).await.unwrap().is_none());
        assert!(store.list_feedback_for("alice").await.unwrap().is_empty());
        // Other users keep their feedback
        assert!(store.find_feedback(bob_fb.id).await.unwrap().is_some());

        assert!(!store.delete_user("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_feedback_only_returns_owned_rows() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice", "a@x.com")).await.unwrap();
        store.insert_user(new_user("bob", "b@x.com")).await.unwrap();
        store
            .insert_feedback("alice", FeedbackDraft::new("a1", "x"))
            .await
            .unwrap();
        store
            .insert_feedback("bob", FeedbackDraft::new("b1", "x"))
            .await
            .unwrap();
        store
            .insert_feedback("alice", FeedbackDraft::new("a2", "x"))
            .await
            .unwrap();

        let titles: Vec<String> = store
            .list_feedback_for("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["a1", "a2"]);
    }
}
