//! The `lexilearn buddy` and `lexilearn score` commands.

use std::path::PathBuf;

use anyhow::Result;

use lexilearn_core::buddy::{Buddy, BuddyResponse};
use lexilearn_core::model::Mood;
use lexilearn_providers::{create_encouragement, create_score_store, load_config_from};

use crate::commands::into_notice;

pub async fn execute(mood: Mood, user: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_score_store(&config.score_store);
    let provider = create_encouragement(&config.provider)?;
    let buddy = Buddy::new(store.as_ref(), provider.as_ref());

    let user_id = user.as_deref().unwrap_or(&config.user_id);
    let name = user.as_deref().unwrap_or(config.display_name());

    match buddy
        .respond(user_id, name, mood)
        .await
        .map_err(into_notice)?
    {
        BuddyResponse::Gems { earned, total } => {
            println!("Yay! You earned {earned} gems. You now have {total} gems.")
        }
        BuddyResponse::Message(message) => println!("{message}"),
    }
    Ok(())
}

pub async fn score(user: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_score_store(&config.score_store);
    let provider = create_encouragement(&config.provider)?;
    let buddy = Buddy::new(store.as_ref(), provider.as_ref());

    let user_id = user.as_deref().unwrap_or(&config.user_id);
    let total = buddy.score(user_id).await.map_err(into_notice)?;
    println!("{user_id} has {total} gems.");
    Ok(())
}
