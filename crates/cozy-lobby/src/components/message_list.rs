//! Message list for the active prefix, with scroll-to-newest.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use futures::StreamExt;

use crate::bridge::StoreHandle;
use crate::messages::{load_feed, MessageFeed, ScrollTracker};
use crate::state::{cancel_watcher, LobbyContext, SessionContext, WatcherSlot};
use crate::stream::store_notices;

const SCROLL_TO_BOTTOM_JS: &str = r#"
    const el = document.getElementById('author-messages');
    if (el) { el.scrollTop = el.scrollHeight; }
"#;

/// Messages under the active prefix, oldest first.
#[component]
pub fn MessageList() -> Element {
    let session = use_context::<SessionContext>();
    let lobby = use_context::<LobbyContext>();
    let feed = use_signal(MessageFeed::default);
    let running: WatcherSlot = use_hook(|| Rc::new(Cell::new(None)));
    let tracker = use_hook(|| Rc::new(RefCell::new(ScrollTracker::new())));

    // Exactly one subscription, always for the current workspace and prefix.
    use_effect(move || {
        let workspace = session.current_workspace.read().clone();
        let prefix = lobby.active_prefix.read().clone();
        let store = session.store.peek().clone();
        cancel_watcher(&running);
        if let Some(workspace) = workspace {
            tracing::debug!(%workspace, %prefix, "subscribing message list");
            running.set(Some(spawn(watch_feed(store, workspace, prefix, feed))));
        }
    });

    // Scroll only when the newest message or the prefix changed.
    use_effect(move || {
        let Some(key) = feed.read().scroll_key.clone() else {
            return;
        };
        if tracker.borrow_mut().observe(key) {
            spawn(async move {
                // Let the DOM pick up the new rows first.
                tokio::time::sleep(Duration::from_millis(20)).await;
                document::eval(SCROLL_TO_BOTTOM_JS);
            });
        }
    });

    let workspace = session.current_workspace.read().clone().unwrap_or_default();
    let prefix = lobby.active_prefix.read().clone();
    // A feed still loaded for the previous prefix is never shown.
    let rows = feed.read().rows_for(&workspace, &prefix).to_vec();

    rsx! {
        div { class: "preamble",
            em { "This is where documents will appear. If you don't see any, you might need to connect to a Pub, or turn on syncing." }
            hr {}
        }
        div { id: "author-messages",
            for row in rows {
                super::message_row::MessageRow {
                    key: "{row.path}",
                    view: row.clone(),
                }
            }
        }
    }
}

async fn watch_feed(
    store: StoreHandle,
    workspace: String,
    prefix: String,
    mut feed: Signal<MessageFeed>,
) {
    let mut notices = store_notices(store.store.subscribe());
    loop {
        match load_feed(store.store.as_ref(), &workspace, &prefix) {
            Ok(loaded) => feed.set(loaded),
            Err(e) => {
                tracing::warn!(%workspace, %prefix, error = %e, "failed to load messages");
                feed.set(MessageFeed {
                    workspace: workspace.clone(),
                    prefix: prefix.clone(),
                    ..MessageFeed::default()
                });
            }
        }
        // Display names live under /about/, so those writes matter too.
        loop {
            match notices.next().await {
                Some(notice)
                    if notice.affects(&workspace, &prefix) || notice.affects(&workspace, "/about/") =>
                {
                    break
                }
                Some(_) => continue,
                None => return,
            }
        }
    }
}
