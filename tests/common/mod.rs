// Common test utilities shared across test files

use tableau_locator::{Protocol, ResourceLocator, ServerConnectionContext, ServerVersion};

pub const HOST: &str = "tableau.example.com";

/// Locator for an HTTPS server on API version 3.3
#[allow(dead_code)]
pub fn locator() -> ResourceLocator {
    locator_for(ServerVersion::Server2019_1)
}

#[allow(dead_code)]
pub fn locator_for(version: ServerVersion) -> ResourceLocator {
    let ctx = ServerConnectionContext::new(Protocol::Https, HOST, "finance", version, 100)
        .expect("Failed to build test context");
    ResourceLocator::new(ctx).expect("Failed to build test locator")
}

/// Versioned API root of [`locator`]
#[allow(dead_code)]
pub fn api_root() -> String {
    format!("https://{}/api/3.3", HOST)
}
