//! Title, description and tag inputs for the selected file.

use leptos::*;
use s3drop::Action;
use web_sys::KeyboardEvent;

use crate::types::{BrowserAction, BrowserUploader};

#[component]
pub fn MetadataForm(
    uploader: RwSignal<BrowserUploader>,
    dispatch: Callback<BrowserAction>,
) -> impl IntoView {
    let title = move || uploader.with(|u| u.state().metadata.title.clone());
    let description = move || uploader.with(|u| u.state().metadata.description.clone());

    view! {
        <div class="metadata-form">
            <input
                type="text"
                class="field"
                placeholder="Title"
                prop:value=title
                on:input=move |ev| dispatch.call(Action::TitleChanged(event_target_value(&ev)))
            />
            <textarea
                class="field"
                placeholder="Description"
                rows="3"
                prop:value=description
                on:input=move |ev| dispatch.call(Action::DescriptionChanged(event_target_value(&ev)))
            ></textarea>
            <TagEditor uploader=uploader dispatch=dispatch/>
        </div>
    }
}

/// Tag entry field plus removable chips. Enter commits the draft.
#[component]
fn TagEditor(
    uploader: RwSignal<BrowserUploader>,
    dispatch: Callback<BrowserAction>,
) -> impl IntoView {
    let tags = create_memo(move |_| uploader.with(|u| u.state().metadata.tags.clone()));
    let draft = move || uploader.with(|u| u.state().tag_draft.clone());

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            dispatch.call(Action::TagCommitted);
        }
    };

    view! {
        <div class="tag-editor">
            <input
                type="text"
                class="field"
                placeholder="Add tags (press Enter)"
                prop:value=draft
                on:input=move |ev| dispatch.call(Action::TagDraftChanged(event_target_value(&ev)))
                on:keydown=on_keydown
            />
            <Show when=move || !tags.get().is_empty() fallback=|| view! {}>
                <div class="tags">
                    <For
                        each=move || tags.get()
                        key=|tag| tag.clone()
                        children=move |tag| {
                            let to_remove = tag.clone();
                            view! {
                                <span class="tag">
                                    {tag}
                                    <button
                                        class="tag-remove"
                                        title="Remove tag"
                                        on:click=move |_| dispatch.call(Action::TagRemoved(to_remove.clone()))
                                    >
                                        "×"
                                    </button>
                                </span>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
