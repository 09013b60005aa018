//! Birdseed demo binary
//!
//! Seeds the demo dataset and walks through a short scripted session
//! so the data layer's behavior can be observed from the logs.

use birdseed::session::UserRef;
use birdseed::{AppState, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Initialize tracing/logging
/// 2. Load configuration from file and environment
/// 3. Initialize AppState (seed + default session)
/// 4. Run the scripted walkthrough
/// 5. Export messages if configured
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize tracing/logging
    let log_format =
        std::env::var("BIRDSEED__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "birdseed=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "birdseed=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!("Starting Birdseed demo...");

    // 2. Load configuration
    let config = config::AppConfig::load()?;
    tracing::info!(
        default_user = %config.session.default_user,
        "Configuration loaded"
    );

    // 3. Initialize application state
    let state = AppState::new(config.clone())?;

    // 4. Scripted walkthrough
    run_demo(&state)?;

    // 5. Export messages if configured
    if config.export.enabled {
        state.messages().export_to_file(&config.export.path)?;
    }

    Ok(())
}

/// Exercise each service once against the seeded dataset
fn run_demo(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let profiles = state.profiles();
    let tweets = state.tweets();
    let timelines = state.timelines();
    let messages = state.messages();
    let notifications = state.notifications();

    let me = profiles.profile(&UserRef::Current)?;
    tracing::info!(
        handle = %me.user.handle,
        followers = me.followers.len(),
        following = me.following.len(),
        "Session user"
    );

    let feed = timelines.home_timeline();
    tracing::info!(tweets = feed.len(), "Home timeline assembled");
    if let Some(newest) = feed.first() {
        let thread = timelines.thread(&newest.id)?;
        tracing::info!(tweet = %newest.id, replies = thread.len() - 1, "Newest thread");

        let action = tweets.toggle_like(&newest.id)?;
        tracing::info!(tweet = %newest.id, ?action, "Toggled like on newest tweet");
    }

    let posted = tweets.post("Trying out the seeded demo feed today! #birdseed")?;
    tweets.reply(&posted.id, "Replying to myself to show threading.")?;

    let inbox = messages.inbox(&UserRef::Current)?;
    tracing::info!(
        messages = inbox.len(),
        unread = messages.unread_count(&UserRef::Current)?,
        "Inbox"
    );
    if let Some(latest) = inbox.first() {
        messages.reply(&latest.id, "Thanks, let's find a slot this week.")?;
    }

    tracing::info!(
        feed = notifications.all().len(),
        mine = notifications.for_user(&UserRef::Current)?.len(),
        unread = notifications.unread_count(),
        "Notifications"
    );
    notifications.reset_count();

    Ok(())
}
