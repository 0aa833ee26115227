use std::env;
use std::path;

use anyhow::Result;
use uuid::Uuid;

use super::Sessions;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn scratch_dir() -> path::PathBuf {
    return env::temp_dir().join(format!("groundwork-sessions-{}", Uuid::new_v4()));
}

#[test]
fn it_creates_short_ids() {
    let id = Sessions::create_id();
    assert_eq!(id.split('-').count(), 2);
    assert_ne!(id, Sessions::create_id());
}

#[tokio::test]
async fn it_saves_loads_and_deletes_a_session() -> Result<()> {
    let sessions = Sessions::new(scratch_dir());
    let id = Sessions::create_id();
    let messages = vec![
        Message::new(Role::User, "hello"),
        Message::new(Role::Assistant, "hi"),
    ];

    sessions.save(&id, &messages).await?;

    let loaded = sessions.load(&id).await?;
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.state.messages.len(), 2);

    // Listing trims each session to its first user message.
    let listed = sessions.list().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].state.messages.len(), 1);
    assert_eq!(listed[0].state.messages[0].role, Role::User);

    sessions.delete(&id).await?;
    assert!(sessions.load(&id).await.is_err());

    sessions.delete_all().await?;
    return Ok(());
}

#[tokio::test]
async fn it_lists_nothing_for_a_missing_cache_dir() -> Result<()> {
    let sessions = Sessions::new(scratch_dir());
    assert!(sessions.list().await?.is_empty());
    return Ok(());
}
