// Domain model for endpoint resolution and upload sequencing

pub mod content_url;
pub mod context;
pub mod filter;
pub mod locator;
pub mod params;
pub mod registry;
pub mod template;
pub mod upload;
pub mod version;

pub use content_url::ParsedContentUrl;
pub use context::{
    ServerConnectionContext, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, UPLOAD_CHUNK_SIZE,
};
pub use filter::ViewFilter;
pub use locator::ResourceLocator;
pub use params::{Page, PageOrientation, PageType};
pub use registry::{Operation, TemplateRegistry, VIEW_FILTER_TEMPLATE};
pub use upload::{UploadCoordinator, UploadSequence, UploadSession, UploadState};
pub use version::{api_version_for, Protocol, ServerVersion};
