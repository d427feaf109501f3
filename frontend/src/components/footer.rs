//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Secure file upload powered by AWS S3 • " <span class="rust-badge">"🦀 Rust + Leptos"</span></p>
        </footer>
    }
}
