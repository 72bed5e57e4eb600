//! Client execution logic.

use crate::{
    app::App,
    config::ClientConfig,
    notification::NotificationFeed,
    session::SessionStorage,
    toast::TerminalToastSink,
};

/// Print the unread badge whenever it changes
fn spawn_badge(feed: NotificationFeed) -> tokio::task::JoinHandle<()> {
    let mut unread = feed.watch_unread();
    tokio::spawn(async move {
        while unread.changed().await.is_ok() {
            let count = *unread.borrow_and_update();
            println!("🔔 {} unread", count);
        }
    })
}

/// Listen for realtime notifications until Ctrl+C
pub async fn run_listener(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = match SessionStorage::new(&config.session_file).load().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Ignoring unreadable session: {}", e);
            Default::default()
        }
    };
    match session.display_name() {
        Some(name) => tracing::info!("Signed in as {}", name),
        None => tracing::info!("No signed-in user found"),
    }

    let app = App::start(config.channel, Box::new(TerminalToastSink));
    let feed = app.notifications();
    let badge = spawn_badge(feed.clone());

    tokio::signal::ctrl_c().await?;

    let items = feed.items().await;
    println!(
        "\n{} notification(s) this session, {} unread",
        items.len(),
        feed.unread_count().await
    );
    for notification in &items {
        let received_at = notification.received_at_rfc3339().unwrap_or_default();
        println!("  {} {}", received_at, notification.display_text());
    }

    badge.abort();
    app.shutdown();
    Ok(())
}
