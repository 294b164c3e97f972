//! A single message row: `<name>: <content>`.

use dioxus::prelude::*;

use crate::render::MessageView;

/// Message row. The name hovers the author address, the content hovers the time.
#[component]
pub fn MessageRow(view: MessageView) -> Element {
    rsx! {
        div { class: "message",
            span {
                class: "{view.color_class}",
                title: "{view.author}",
                "{view.author_name}"
            }
            ": "
            span {
                class: "message-content",
                title: "{view.timestamp_title}",
                "{view.content}"
            }
        }
    }
}
