use leptos::*;

/// Upload progress bar with its percentage label.
#[component]
pub fn ProgressSection(#[prop(into)] progress: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-section show">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style:width=move || format!("{}%", progress.get())
                ></div>
            </div>
            <p class="progress-text">
                {move || format!("Uploading... {}%", progress.get())}
            </p>
        </div>
    }
}
