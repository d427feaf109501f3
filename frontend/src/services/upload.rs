//! Managed multi-part upload to S3.
//!
//! Uses `@aws-sdk/lib-storage` via JavaScript (`src/js/s3_upload.js`). The
//! SDK splits the file into parts, uploads them in parallel and aggregates
//! progress; this side only maps requests in and progress/outcome out.

use std::collections::BTreeMap;

use s3drop::{
    transfer_channel, Credentials, ProgressEvent, Transfer, TransferError, TransferHandle,
    TransferOptions, TransferRequest,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::File;

/// S3 client settings, shaped like the SDK's `S3ClientConfig`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig<'a> {
    region: &'a str,
    endpoint: String,
    force_path_style: bool,
    credentials: &'a Credentials,
}

/// Object parameters, shaped like `PutObjectCommandInput` (minus `Body`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectParams<'a> {
    bucket: &'a str,
    key: &'a str,
    content_type: &'a str,
    metadata: &'a BTreeMap<String, String>,
}

/// [`Transfer`] backed by the SDK's managed `Upload`.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3ManagedUpload;

impl S3ManagedUpload {
    pub fn new() -> Self {
        Self
    }
}

impl Transfer for S3ManagedUpload {
    type Body = File;

    fn start(&self, request: TransferRequest<File>) -> TransferHandle {
        let (sink, handle) = transfer_channel();

        let args = match JsArgs::from_request(&request) {
            Ok(args) => args,
            Err(e) => {
                log::error!("❌ Could not prepare upload parameters: {}", e);
                sink.finish(Err(TransferError::Rejected(format!(
                    "Failed to prepare upload: {}",
                    e
                ))));
                return handle;
            }
        };

        let progress = sink.progress_sender();
        let on_progress = Closure::<dyn FnMut(JsValue, JsValue)>::new(
            move |loaded: JsValue, total: JsValue| {
                if let Some(event) = progress_event(&loaded, &total) {
                    let _ = progress.unbounded_send(event);
                }
            },
        );

        log::info!(
            "📤 Uploading {} to bucket {} ({} MiB parts, {} in parallel)",
            request.key,
            request.destination.bucket,
            request.options.part_size / (1024 * 1024),
            request.options.queue_size
        );

        let promise = start_managed_upload_js(
            &args.client,
            &args.params,
            &request.body,
            &args.options,
            &on_progress,
        );

        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(transfer_error);

            match &result {
                Ok(()) => log::info!("✅ Upload finished"),
                Err(e) => log::error!("❌ Upload failed: {}", e),
            }

            // The SDK reports no progress after settling; dropping the
            // callback closes the progress stream before the outcome lands.
            drop(on_progress);
            sink.finish(result);
        });

        handle
    }
}

/// Serialized arguments for the JavaScript side.
struct JsArgs {
    client: JsValue,
    params: JsValue,
    options: JsValue,
}

impl JsArgs {
    fn from_request(request: &TransferRequest<File>) -> Result<Self, serde_wasm_bindgen::Error> {
        // Plain objects, not `Map`s: the SDK reads `Metadata` with property access.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        Ok(Self {
            client: client_config(request).serialize(&serializer)?,
            params: object_params(request).serialize(&serializer)?,
            options: request.options.serialize(&serializer)?,
        })
    }
}

fn client_config<B>(request: &TransferRequest<B>) -> ClientConfig<'_> {
    ClientConfig {
        region: &request.destination.region,
        endpoint: request.destination.endpoint_url(),
        force_path_style: true,
        credentials: &request.destination.credentials,
    }
}

fn object_params<B>(request: &TransferRequest<B>) -> ObjectParams<'_> {
    ObjectParams {
        bucket: &request.destination.bucket,
        key: &request.key,
        content_type: &request.content_type,
        metadata: &request.metadata,
    }
}

/// Read one `httpUploadProgress` notification.
fn progress_event(loaded: &JsValue, total: &JsValue) -> Option<ProgressEvent> {
    progress_from_numbers(loaded.as_f64(), total.as_f64())
}

/// `loaded` is required; a missing, non-finite or non-positive `total` is
/// passed on as unknown.
fn progress_from_numbers(loaded: Option<f64>, total: Option<f64>) -> Option<ProgressEvent> {
    let loaded = loaded.filter(|v| v.is_finite() && *v >= 0.0)?;
    let total = total
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u64);
    Some(ProgressEvent::new(loaded as u64, total))
}

/// Only real `Error` objects carry a message worth showing.
fn transfer_error(err: JsValue) -> TransferError {
    rejection_error(
        err.dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message())),
    )
}

/// `None` when the rejection value was not an `Error`.
fn rejection_error(message: Option<String>) -> TransferError {
    TransferError::from_message(message)
}

/// JavaScript functions from s3_upload.js
#[wasm_bindgen(module = "/src/js/s3_upload.js")]
extern "C" {
    #[wasm_bindgen(js_name = "startManagedUpload")]
    fn start_managed_upload_js(
        client: &JsValue,
        params: &JsValue,
        body: &File,
        options: &JsValue,
        on_progress: &Closure<dyn FnMut(JsValue, JsValue)>,
    ) -> js_sys::Promise;
}
