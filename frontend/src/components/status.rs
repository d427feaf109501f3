//! Terminal success / error banners.

use leptos::*;
use s3drop::{UploadStatus, GENERIC_FAILURE_MESSAGE};

#[component]
pub fn StatusBanner(
    #[prop(into)] status: Signal<UploadStatus>,
    #[prop(into)] error_message: Signal<Option<String>>,
    /// Clears the form after a failure
    on_reset: Callback<()>,
) -> impl IntoView {
    move || match status.get() {
        UploadStatus::Success => view! {
            <div class="banner banner-success">"✅ Upload successful!"</div>
        }
        .into_view(),
        UploadStatus::Error => view! {
            <div class="banner banner-error">
                <span>
                    "⚠️ "
                    {move || {
                        error_message
                            .get()
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
                    }}
                </span>
                <button class="banner-action" on:click=move |_| on_reset.call(())>
                    "Start over"
                </button>
            </div>
        }
        .into_view(),
        UploadStatus::Idle | UploadStatus::Uploading => ().into_view(),
    }
}
