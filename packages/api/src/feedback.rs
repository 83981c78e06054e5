//! Guarded feedback and profile operations.
//!
//! Every function takes the caller's session identity and runs the owner check before
//! any write. For id-addressed feedback the lookup comes first, so an unknown id is
//! [`Error::NotFound`] regardless of who asks.

use store::{Feedback, FeedbackDraft, FeedbackStore};

use crate::auth::require_owner;
use crate::error::{Error, Result};
use crate::models::{Profile, UserInfo};

/// The owner's account plus their feedback, ordered by id.
pub async fn profile(
    store: &dyn FeedbackStore,
    identity: Option<&str>,
    username: &str,
) -> Result<Profile> {
    require_owner(identity, username)?;

    let user = store.find_user(username).await?.ok_or(Error::NotFound)?;
    let feedback = store.list_feedback_for(username).await?;

    Ok(Profile {
        user: UserInfo::from(&user),
        feedback,
    })
}

/// Create feedback owned by `owner`.
pub async fn add(
    store: &dyn FeedbackStore,
    identity: Option<&str>,
    owner: &str,
    draft: FeedbackDraft,
) -> Result<Feedback> {
    require_owner(identity, owner)?;

    let feedback = store.insert_feedback(owner, draft).await?;
    tracing::info!(id = feedback.id, owner, "Added feedback");
    Ok(feedback)
}

/// Fetch feedback for the edit form.
pub async fn load_for_edit(
    store: &dyn FeedbackStore,
    identity: Option<&str>,
    id: i32,
) -> Result<Feedback> {
    let feedback = store.find_feedback(id).await?.ok_or(Error::NotFound)?;
    require_owner(identity, &feedback.username)?;
    Ok(feedback)
}

pub async fn update(
    store: &dyn FeedbackStore,
    identity: Option<&str>,
    id: i32,
    draft: FeedbackDraft,
) -> Result<Feedback> {
    load_for_edit(store, identity, id).await?;

    let updated = store
        .update_feedback(id, draft)
        .await?
        .ok_or(Error::NotFound)?;
    tracing::info!(id, owner = %updated.username, "Updated feedback");
    Ok(updated)
}

/// Delete feedback. Returns the owner's username so the caller can redirect there.
pub async fn delete(store: &dyn FeedbackStore, identity: Option<&str>, id: i32) -> Result<String> {
    let feedback = store.find_feedback(id).await?.ok_or(Error::NotFound)?;
    require_owner(identity, &feedback.username)?;

    if !store.delete_feedback(id).await? {
        return Err(Error::NotFound);
    }
    tracing::info!(id, owner = %feedback.username, "Deleted feedback");
    Ok(feedback.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{MemoryStore, NewUser};

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (name, email) in [("alice", "a@x.com"), ("bob", "b@x.com")] {
            store
                .insert_user(NewUser {
                    username: name.into(),
                    password_hash: "hash".into(),
                    email: email.into(),
                    first_name: "F".into(),
                    last_name: "L".into(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_owner_can_add_and_view() {
        let store = seeded().await;

        let fb = add(&store, Some("alice"), "alice", FeedbackDraft::new("T", "C"))
            .await
            .unwrap();
        assert_eq!(fb.username, "alice");

        let profile = profile(&store, Some("alice"), "alice").await.unwrap();
        assert_eq!(profile.user.username, "alice");
        assert_eq!(profile.feedback.len(), 1);
        assert_eq!(profile.feedback[0].title, "T");
    }

    #[tokio::test]
    async fn test_other_user_cannot_view_or_add() {
        let store = seeded().await;

        assert!(matches!(
            profile(&store, Some("bob"), "alice").await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            profile(&store, None, "alice").await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            add(&store, Some("bob"), "alice", FeedbackDraft::new("T", "C")).await,
            Err(Error::Unauthorized)
        ));
        assert!(store.list_feedback_for("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_user_cannot_update_or_delete() {
        let store = seeded().await;
        let fb = add(&store, Some("alice"), "alice", FeedbackDraft::new("T", "C"))
            .await
            .unwrap();

        assert!(matches!(
            update(&store, Some("bob"), fb.id, FeedbackDraft::new("X", "Y")).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            load_for_edit(&store, Some("bob"), fb.id).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            delete(&store, Some("bob"), fb.id).await,
            Err(Error::Unauthorized)
        ));

        let unchanged = store.find_feedback(fb.id).await.unwrap().unwrap();
        assert_eq!(unchanged, fb);
    }

    #[tokio::test]
    async fn test_owner_updates_and_deletes() {
        let store = seeded().await;
        let fb = add(&store, Some("alice"), "alice", FeedbackDraft::new("T", "C"))
            .await
            .unwrap();

        let updated = update(&store, Some("alice"), fb.id, FeedbackDraft::new("T2", "C2"))
            .await
            .unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.content, "C2");

        let owner = delete(&store, Some("alice"), fb.id).await.unwrap();
        assert_eq!(owner, "alice");
        assert!(store.find_feedback(fb.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_for_everyone() {
        let store = seeded().await;

        for identity in [Some("alice"), Some("bob"), None] {
            assert!(matches!(
                load_for_edit(&store, identity, 42).await,
                Err(Error::NotFound)
            ));
            assert!(matches!(
                update(&store, identity, 42, FeedbackDraft::new("a", "b")).await,
                Err(Error::NotFound)
            ));
            assert!(matches!(
                delete(&store, identity, 42).await,
                Err(Error::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn test_profile_of_deleted_user_is_not_found() {
        let store = seeded().await;
        store.delete_user("alice").await.unwrap();

        assert!(matches!(
            profile(&store, Some("alice"), "alice").await,
            Err(Error::NotFound)
        ));
    }
}
