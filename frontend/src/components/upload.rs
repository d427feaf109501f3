//! Upload widget with drag & drop support.
//!
//! Owns one [`BrowserUploader`] in a signal. Every DOM event becomes an
//! action for the core reducer; the commands it returns (start a transfer,
//! schedule the post-success reset) are run here with `spawn_local`.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use s3drop::{
    drive_transfer, format_size, Action, Command, ConfigResult, Destination, Transfer,
    UploadStatus, Uploader,
};
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::components::{MetadataForm, ProgressSection, StatusBanner};
use crate::config::DROP_HINT;
use crate::services::S3ManagedUpload;
use crate::types::{picked_files, BrowserAction, BrowserUploader};

/// What command handlers need to reach back into the widget.
#[derive(Clone)]
struct Shell {
    uploader: RwSignal<BrowserUploader>,
    transfer: Rc<dyn Transfer<Body = File>>,
}

/// Apply an action and run whatever command comes back.
fn run_action(shell: &Shell, action: BrowserAction) {
    let command = shell.uploader.try_update(|u| u.dispatch(action)).flatten();

    match command {
        Some(Command::StartTransfer { attempt, request }) => {
            let shell = shell.clone();
            spawn_local(async move {
                let transfer = Rc::clone(&shell.transfer);
                drive_transfer(transfer.as_ref(), attempt, request, |action| {
                    run_action(&shell, action)
                })
                .await;
            });
        }
        Some(Command::ScheduleReset { attempt, delay }) => {
            let shell = shell.clone();
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            spawn_local(async move {
                TimeoutFuture::new(millis).await;
                run_action(&shell, Action::ResetElapsed { attempt });
            });
        }
        None => {}
    }
}

#[component]
pub fn UploadSection(
    /// Destination validated at start-up
    destination: ConfigResult<Destination>,
) -> impl IntoView {
    let uploader = create_rw_signal(Uploader::<File>::new(destination));
    let shell = Shell {
        uploader,
        transfer: Rc::new(S3ManagedUpload::new()),
    };
    let dispatch = Callback::new(move |action: BrowserAction| run_action(&shell, action));

    let status = create_memo(move |_| uploader.with(|u| u.state().status));
    let progress = create_memo(move |_| uploader.with(|u| u.state().progress));
    let dragging = create_memo(move |_| uploader.with(|u| u.state().dragging));
    let selected = create_memo(move |_| uploader.with(|u| u.state().selected.clone()));
    let error_message = create_memo(move |_| uploader.with(|u| u.state().error_message.clone()));
    let can_upload = create_memo(move |_| uploader.with(|u| u.state().can_upload()));

    let on_drag = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let action = match ev.type_().as_str() {
            "dragenter" => Action::DragEnter,
            "dragover" => Action::DragOver,
            _ => Action::DragLeave,
        };
        dispatch.call(action);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let files = picked_files(ev.data_transfer().and_then(|dt| dt.files()));
        dispatch.call(Action::Drop(files));
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        dispatch.call(Action::FilesChosen(picked_files(input.files())));
        // Allow picking the same file again after a reset
        input.set_value("");
    };

    let on_upload = move |_| {
        dispatch.call(Action::UploadRequested {
            at: chrono::Utc::now(),
        });
    };

    view! {
        <div class="uploader">
            <div
                class="upload-section"
                class:dragging=move || dragging.get()
                on:dragenter=on_drag
                on:dragover=on_drag
                on:dragleave=on_drag
                on:drop=on_drop
            >
                <Show
                    when=move || selected.get().is_some()
                    fallback=move || view! { <FilePrompt dragging=dragging on_change=on_file_change/> }
                >
                    <div class="selected-file">
                        <span class="upload-icon">"📄"</span>
                        <span class="file-name">
                            {move || selected.get().map(|f| f.name).unwrap_or_default()}
                        </span>
                        <span class="file-size">
                            {move || selected.get().map(|f| format_size(f.size)).unwrap_or_default()}
                        </span>
                    </div>

                    <MetadataForm uploader=uploader dispatch=dispatch/>

                    <button
                        class="upload-button"
                        disabled=move || !can_upload.get()
                        on:click=on_upload
                    >
                        "Upload File"
                    </button>
                </Show>

                <Show
                    when=move || status.get() == UploadStatus::Uploading
                    fallback=|| view! {}
                >
                    <ProgressSection progress=progress/>
                </Show>

                <StatusBanner
                    status=status
                    error_message=error_message
                    on_reset=Callback::new(move |_| dispatch.call(Action::Reset))
                />
            </div>
        </div>
    }
}

/// Empty drop zone: hidden file input behind a clickable label.
#[component]
fn FilePrompt<F>(#[prop(into)] dragging: Signal<bool>, on_change: F) -> impl IntoView
where
    F: FnMut(Event) + 'static,
{
    let input_ref = create_node_ref::<html::Input>();

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="file-prompt" on:click=open_picker>
            <div class="upload-icon" class:active=move || dragging.get()>"📤"</div>
            <div class="upload-text">{DROP_HINT}</div>
            <div class="upload-hint">"Supported files: Any file type"</div>
            <input
                type="file"
                id="fileInput"
                style="display:none"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>
    }
}
