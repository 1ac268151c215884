// Three-phase chunked upload: initiate -> append* -> finalize

use std::fmt;

use super::locator::ResourceLocator;
use super::registry::Operation;
use super::template::{Bindings, Placeholder};
use crate::error::{LocatorError, Result};

/// Reject empty or blank session identifiers before they reach a template
pub(crate) fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.trim().is_empty() {
        return Err(LocatorError::invalid_session("upload session id is empty"));
    }
    Ok(())
}

/// Server-issued identifier correlating the phases of one upload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadSession {
    session_id: String,
}

impl UploadSession {
    pub fn new(session_id: impl Into<String>) -> Result<Self> {
        let session_id = session_id.into();
        validate_session_id(&session_id)?;
        Ok(Self { session_id })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }
}

impl fmt::Display for UploadSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.session_id)
    }
}

/// Endpoint builder for the upload phases of one site.
///
/// Stateless: it never tracks live sessions. Use [`UploadSequence`] when the
/// phase order should be enforced.
#[derive(Debug, Clone, Copy)]
pub struct UploadCoordinator<'a> {
    locator: &'a ResourceLocator,
    site_id: &'a str,
}

impl<'a> UploadCoordinator<'a> {
    pub fn new(locator: &'a ResourceLocator, site_id: &'a str) -> Self {
        Self { locator, site_id }
    }

    pub fn site_id(&self) -> &str {
        self.site_id
    }

    /// Largest chunk a caller should send per append
    pub fn chunk_size(&self) -> usize {
        self.locator.context().upload_chunk_size()
    }

    pub fn initiate(&self) -> Result<String> {
        self.locator.resolve_operation(
            Operation::InitiateUpload,
            &Bindings::new().bind(Placeholder::SiteId, self.site_id),
        )
    }

    pub fn append_chunk(&self, session_id: &str) -> Result<String> {
        validate_session_id(session_id)?;
        self.locator
            .resolve_operation(Operation::AppendUploadChunk, &self.session(session_id))
    }

    /// Terminal call; always publishes with `overwrite=true`
    pub fn finalize_datasource_publish(
        &self,
        session_id: &str,
        datasource_type: &str,
    ) -> Result<String> {
        validate_session_id(session_id)?;
        self.locator.resolve_operation(
            Operation::FinalizeDatasourcePublish,
            &self
                .session(session_id)
                .bind(Placeholder::DatasourceType, datasource_type),
        )
    }

    /// Terminal call; always publishes with `overwrite=true`
    pub fn finalize_workbook_publish(
        &self,
        session_id: &str,
        workbook_type: &str,
    ) -> Result<String> {
        validate_session_id(session_id)?;
        self.locator.resolve_operation(
            Operation::FinalizeWorkbookPublish,
            &self
                .session(session_id)
                .bind(Placeholder::WorkbookType, workbook_type),
        )
    }

    fn session(&self, session_id: &str) -> Bindings {
        Bindings::new()
            .bind(Placeholder::SiteId, self.site_id)
            .bind(Placeholder::UploadSession, session_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    NotStarted,
    Initiated,
    Finalized,
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadState::NotStarted => "not started",
            UploadState::Initiated => "initiated",
            UploadState::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// One upload driven strictly in order: `NotStarted -> Initiated -> Finalized`
#[derive(Debug, Clone)]
pub struct UploadSequence<'a> {
    coordinator: UploadCoordinator<'a>,
    state: UploadState,
    session: Option<UploadSession>,
}

impl<'a> UploadSequence<'a> {
    pub fn new(coordinator: UploadCoordinator<'a>) -> Self {
        Self {
            coordinator,
            state: UploadState::NotStarted,
            session: None,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    pub fn chunk_size(&self) -> usize {
        self.coordinator.chunk_size()
    }

    fn expect_state(&self, expected: UploadState, action: &str) -> Result<()> {
        if self.state != expected {
            return Err(LocatorError::invalid_session(format!(
                "cannot {} while upload is {}",
                action, self.state
            )));
        }
        Ok(())
    }

    fn session_id(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(UploadSession::id)
            .ok_or_else(|| LocatorError::invalid_session("no upload session has been accepted"))
    }

    /// URL for the initiate request
    pub fn initiate_url(&self) -> Result<String> {
        self.expect_state(UploadState::NotStarted, "initiate")?;
        self.coordinator.initiate()
    }

    /// Record the id returned by the initiate request
    pub fn accept_session(&mut self, session_id: impl Into<String>) -> Result<&UploadSession> {
        self.expect_state(UploadState::NotStarted, "accept a session")?;
        let session = UploadSession::new(session_id)?;
        self.state = UploadState::Initiated;
        Ok(self.session.insert(session))
    }

    pub fn append_url(&self) -> Result<String> {
        self.expect_state(UploadState::Initiated, "append a chunk")?;
        self.coordinator.append_chunk(self.session_id()?)
    }

    pub fn finalize_datasource(&mut self, datasource_type: &str) -> Result<String> {
        self.expect_state(UploadState::Initiated, "finalize")?;
        let url = self
            .coordinator
            .finalize_datasource_publish(self.session_id()?, datasource_type)?;
        self.state = UploadState::Finalized;
        Ok(url)
    }

    pub fn finalize_workbook(&mut self, workbook_type: &str) -> Result<String> {
        self.expect_state(UploadState::Initiated, "finalize")?;
        let url = self
            .coordinator
            .finalize_workbook_publish(self.session_id()?, workbook_type)?;
        self.state = UploadState::Finalized;
        Ok(url)
    }

    /// Drop the session and start over from `NotStarted`
    pub fn reset(&mut self) {
        self.state = UploadState::NotStarted;
        self.session = None;
    }
}
