// Endpoint resolution and chunked upload sequencing for a Tableau Server REST API client

pub mod config;
pub mod domain;
pub mod error;
pub mod publish;

pub use domain::{
    api_version_for, Operation, Page, PageOrientation, PageType, ParsedContentUrl, Protocol,
    ResourceLocator, ServerConnectionContext, ServerVersion, TemplateRegistry, UploadCoordinator,
    UploadSequence, UploadSession, UploadState, ViewFilter, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE,
    UPLOAD_CHUNK_SIZE,
};
pub use error::{LocatorError, Result};
pub use publish::{ChunkTransport, PublishReport, Publisher};
