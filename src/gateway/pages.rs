use maud::{DOCTYPE, Markup, html};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::oauth::Identity;

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body { (content) }
        }
    }
}

/// `02 Jan 2006 15:04`, or `unknown` when absent.
pub(super) fn format_timestamp(ts: Option<OffsetDateTime>) -> String {
    let format = format_description!("[day] [month repr:short] [year] [hour]:[minute]");
    ts.and_then(|ts| ts.format(format).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

pub(super) fn landing() -> Markup {
    layout(
        "Sign in",
        html! {
            h2 { "You are not signed in" }
            a href="/login" { button { "Sign in with Discord" } }
        },
    )
}

pub(super) fn profile(
    identity: &Identity,
    created_at: Option<OffsetDateTime>,
    first_login: Option<OffsetDateTime>,
) -> Markup {
    layout(
        "Profile",
        html! {
            h2 { "Welcome, " (identity.display_name) "#" (identity.discriminator) }
            @if let Some(avatar) = identity.avatar_url() {
                img src=(avatar) width="128";
                br;
            }
            "ID: " (identity.id) br;
            "Account created: " (format_timestamp(created_at)) br;
            "First login: " (format_timestamp(first_login)) br;
            br;
            a href="/logout" { button { "Sign out" } }
        },
    )
}

pub(super) fn error_page(message: &str) -> Markup {
    layout(
        "Sign-in error",
        html! {
            h2 { "Sign-in failed" }
            p { (message) }
            a href="/" { "Back" }
        },
    )
}
