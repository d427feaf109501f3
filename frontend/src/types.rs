//! Browser-side aliases of the core workflow types.
//!
//! In the browser the body of a selected file is the `web_sys::File` handle
//! itself; the SDK reads it directly, nothing is copied into WASM memory.

use s3drop::{Action, PickedFile, Uploader};
use web_sys::{File, FileList};

/// Uploader holding browser `File` handles.
pub type BrowserUploader = Uploader<File>;

/// Reducer action carrying browser `File` handles.
pub type BrowserAction = Action<File>;

/// Convert a `FileList` (drop or picker) into picked files, in order.
pub fn picked_files(list: Option<FileList>) -> Vec<PickedFile<File>> {
    let Some(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| {
            let size = file.size().max(0.0) as u64;
            PickedFile::new(file.name(), file.type_(), size, file)
        })
        .collect()
}
