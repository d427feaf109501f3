//! s3drop - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for dropping a file, describing it (title,
//! description, tags) and uploading it to an S3 bucket with the AWS SDK's
//! managed multi-part upload.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, tagline)                                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UploadSection                                               │
//! │  ├── drop zone / file picker                                │
//! │  ├── MetadataForm (title, description, tags)                │
//! │  ├── ProgressSection (while uploading)                      │
//! │  └── StatusBanner (success / error)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Build-time destination and UI constants
//! - [`types`] - Browser aliases of the core workflow types
//! - [`components`] - UI components
//! - [`services`] - Managed S3 upload (JS SDK binding)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{picked_files, BrowserAction, BrowserUploader};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_TITLE/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Validated once; the uploader gets the result explicitly.
    let destination = load_destination();
    match &destination {
        Ok(dest) => log::info!("🪣 Uploading to bucket {} in {}", dest.bucket, dest.region),
        Err(e) => log::error!("❌ AWS configuration is incomplete: {}", e),
    }

    view! {
        <div class="container">
            <Hero/>
            <UploadSection destination=destination/>
            <Footer/>
        </div>
    }
}
