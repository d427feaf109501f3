//! Hero section component

use leptos::*;

use crate::config::{APP_TAGLINE, APP_TITLE};

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <div class="hero-icon">"☁️"</div>
            <h1>{APP_TITLE}</h1>
            <p class="subtitle">{APP_TAGLINE}</p>
        </div>
    }
}
