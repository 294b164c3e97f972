//! Channel list derived from the workspace's document paths.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::StreamExt;

use crate::bridge::StoreHandle;
use crate::paths::list_channels;
use crate::render::path_class;
use crate::state::{cancel_watcher, LobbyContext, SessionContext, WatcherSlot};
use crate::stream::store_notices;

/// Clickable channel prefixes. The active one is highlighted.
#[component]
pub fn PathList() -> Element {
    let session = use_context::<SessionContext>();
    let mut lobby = use_context::<LobbyContext>();
    let channels = use_signal(Vec::<String>::new);
    let running: WatcherSlot = use_hook(|| Rc::new(Cell::new(None)));

    // Re-derive whenever the workspace changes or anything is written in it.
    use_effect(move || {
        let workspace = session.current_workspace.read().clone();
        let roots = session.config.read().allowed_roots.clone();
        let store = session.store.peek().clone();
        cancel_watcher(&running);
        if let Some(workspace) = workspace {
            running.set(Some(spawn(watch_channels(store, workspace, roots, channels))));
        }
    });

    let active = lobby.active_prefix.read().clone();
    let current = channels.read().clone();

    rsx! {
        div { class: "preamble",
            em { "Here you can see some paths that this workspace uses for chatting! Click on them to change where you view and send documents." }
            hr {}
        }
        div { id: "paths",
            for path in current {
                {
                    let class = path_class(&path, &active);
                    let target = path.clone();
                    rsx! {
                        button {
                            key: "{path}",
                            class: "{class}",
                            onclick: move |_| lobby.active_prefix.set(target.clone()),
                            "{path}"
                        }
                    }
                }
            }
        }
    }
}

async fn watch_channels(
    store: StoreHandle,
    workspace: String,
    roots: Vec<String>,
    mut channels: Signal<Vec<String>>,
) {
    let mut notices = store_notices(store.store.subscribe());
    loop {
        match list_channels(store.store.as_ref(), &workspace, &roots) {
            Ok(list) => {
                if *channels.peek() != list {
                    channels.set(list);
                }
            }
            Err(e) => {
                tracing::warn!(%workspace, error = %e, "failed to list channels");
                channels.set(Vec::new());
            }
        }
        loop {
            match notices.next().await {
                Some(notice) if notice.affects(&workspace, "/") => break,
                Some(_) => continue,
                None => return,
            }
        }
    }
}
