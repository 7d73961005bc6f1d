use crate::app::{AppContext, FeedAction, FeedSideEffect, FeedStore, Result, TributaryError};
use crate::domain::FeedState;

/// Dispatch `actions` in order, waiting for the store to settle after each.
///
/// Side effects raised along the way are printed to stderr; the first one
/// becomes the command's error.
async fn drive(store: &FeedStore, actions: Vec<FeedAction>) -> Result<FeedState> {
    let mut side_effects = store.observe_side_effect();
    let mut first_error = None;

    for action in actions {
        store.dispatch(action);
        store.settled().await;

        while let Ok(effect) = side_effects.try_recv() {
            eprintln!("Error: {}", effect);
            let FeedSideEffect::Error(error) = effect;
            first_error.get_or_insert(error);
        }
    }

    match first_error {
        Some(error) => Err(TributaryError::Store(error)),
        None => Ok(store.state()),
    }
}

pub async fn refresh(ctx: &AppContext, force: bool) -> Result<()> {
    let state = drive(&ctx.store, vec![FeedAction::refresh(force)]).await?;
    println!("Loaded {} feeds", state.feeds.len());
    Ok(())
}

pub async fn add_feed(ctx: &AppContext, url: &str) -> Result<()> {
    let state = drive(&ctx.store, vec![FeedAction::add(url)]).await?;

    if let Some(feed) = state.feeds.iter().find(|feed| feed.url == url) {
        println!("Added feed: {}", feed.display_title());
        println!("Fetched {} posts", feed.posts.len());
    }
    Ok(())
}

pub async fn remove_feed(ctx: &AppContext, url: &str) -> Result<()> {
    // load first so the removal is checked against what is stored
    let state = drive(&ctx.store, vec![FeedAction::refresh(false)]).await?;
    if !state.contains(url) {
        return Err(TributaryError::UnknownFeed(url.to_string()));
    }

    drive(&ctx.store, vec![FeedAction::delete(url)]).await?;
    println!("Removed feed: {}", url);
    Ok(())
}

pub async fn list_feeds(ctx: &AppContext) -> Result<()> {
    let state = drive(&ctx.store, vec![FeedAction::refresh(false)]).await?;

    if state.feeds.is_empty() {
        println!("No feeds");
        return Ok(());
    }

    for feed in &state.feeds {
        let marker = if feed.is_default { "*" } else { " " };
        println!(
            "{} {} ({} posts)\n    {}",
            marker,
            feed.display_title(),
            feed.posts.len(),
            feed.url
        );
    }

    Ok(())
}

pub async fn list_posts(ctx: &AppContext, feed: Option<&str>) -> Result<()> {
    let state = drive(
        &ctx.store,
        vec![
            FeedAction::refresh(false),
            FeedAction::select(feed.map(str::to_string)),
        ],
    )
    .await?;

    let posts = state.main_feed_posts();
    if posts.is_empty() {
        println!("No posts");
        return Ok(());
    }

    for post in posts {
        let date = post
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());

        println!("{} {}", date, post.display_title());
        if let Some(link) = &post.link {
            println!("           {}", link);
        }
    }

    Ok(())
}
