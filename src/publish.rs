// Chunked publish driver over an abstract transport

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::domain::{ResourceLocator, UploadSequence, UPLOAD_CHUNK_SIZE};
use crate::error::{LocatorError, Result};

/// Network side of a chunked upload, implemented by the HTTP layer.
///
/// Implementations map their own failures to [`LocatorError::Transport`].
#[async_trait]
pub trait ChunkTransport: Send + Sync {
    /// Issue the initiate request and return the server's session id
    async fn initiate(&self, url: &str) -> Result<String>;

    /// Send one chunk of the payload
    async fn append(&self, url: &str, chunk: &[u8]) -> Result<()>;

    /// Commit the upload as a published item
    async fn finalize(&self, url: &str) -> Result<()>;
}

/// Outcome of a completed publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub session_id: String,
    pub chunks: usize,
    pub bytes: u64,
    pub finalize_url: String,
}

#[derive(Debug, Clone, Copy)]
enum PublishKind<'t> {
    Datasource(&'t str),
    Workbook(&'t str),
}

pub struct Publisher<'a, T: ChunkTransport> {
    locator: &'a ResourceLocator,
    site_id: &'a str,
    transport: &'a T,
    chunk_size: usize,
}

impl<'a, T: ChunkTransport> Publisher<'a, T> {
    pub fn new(locator: &'a ResourceLocator, site_id: &'a str, transport: &'a T) -> Self {
        Self {
            locator,
            site_id,
            transport,
            chunk_size: locator.context().upload_chunk_size(),
        }
    }

    /// Use chunks smaller than the server limit
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_size > UPLOAD_CHUNK_SIZE {
            return Err(LocatorError::invalid_context(format!(
                "chunk size must be between 1 and {} bytes, got {}",
                UPLOAD_CHUNK_SIZE, chunk_size
            )));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub async fn publish_datasource<R>(
        &self,
        reader: R,
        datasource_type: &str,
    ) -> Result<PublishReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.publish(reader, PublishKind::Datasource(datasource_type)).await
    }

    pub async fn publish_workbook<R>(&self, reader: R, workbook_type: &str) -> Result<PublishReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.publish(reader, PublishKind::Workbook(workbook_type)).await
    }

    async fn publish<R>(&self, mut reader: R, kind: PublishKind<'_>) -> Result<PublishReport>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut sequence = UploadSequence::new(self.locator.upload(self.site_id));

        let initiate_url = sequence.initiate_url()?;
        tracing::debug!(url = %initiate_url, "initiating upload");
        let session_id = self.transport.initiate(&initiate_url).await?;
        let session_id = sequence.accept_session(session_id)?.id().to_string();

        let mut chunks = 0usize;
        let mut bytes = 0u64;
        loop {
            let mut chunk = Vec::new();
            let read = (&mut reader)
                .take(self.chunk_size as u64)
                .read_to_end(&mut chunk)
                .await?;
            if read == 0 {
                break;
            }

            let append_url = sequence.append_url()?;
            tracing::debug!(session = %session_id, chunk = chunks, len = read, "appending chunk");
            self.transport.append(&append_url, &chunk).await?;

            chunks += 1;
            bytes += read as u64;
        }

        let finalize_url = match kind {
            PublishKind::Datasource(datasource_type) => {
                sequence.finalize_datasource(datasource_type)?
            }
            PublishKind::Workbook(workbook_type) => sequence.finalize_workbook(workbook_type)?,
        };
        tracing::debug!(session = %session_id, chunks, bytes, "finalizing upload");
        self.transport.finalize(&finalize_url).await?;

        Ok(PublishReport {
            session_id,
            chunks,
            bytes,
            finalize_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Protocol, ServerConnectionContext, ServerVersion};

    struct NullTransport;

    #[async_trait]
    impl ChunkTransport for NullTransport {
        async fn initiate(&self, _url: &str) -> Result<String> {
            Ok("s".to_string())
        }

        async fn append(&self, _url: &str, _chunk: &[u8]) -> Result<()> {
            Ok(())
        }

        async fn finalize(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    fn locator() -> ResourceLocator {
        let ctx =
            ServerConnectionContext::with_defaults(Protocol::Https, "host", ServerVersion::Server10)
                .unwrap();
        ResourceLocator::new(ctx).unwrap()
    }

    #[test]
    fn test_default_chunk_size() {
        let locator = locator();
        let publisher = Publisher::new(&locator, "site", &NullTransport);
        assert_eq!(publisher.chunk_size(), UPLOAD_CHUNK_SIZE);
    }

    #[test]
    fn test_chunk_size_bounds() {
        let locator = locator();
        assert!(Publisher::new(&locator, "site", &NullTransport)
            .with_chunk_size(0)
            .is_err());
        assert!(Publisher::new(&locator, "site", &NullTransport)
            .with_chunk_size(UPLOAD_CHUNK_SIZE + 1)
            .is_err());
        let publisher = Publisher::new(&locator, "site", &NullTransport)
            .with_chunk_size(4)
            .unwrap();
        assert_eq!(publisher.chunk_size(), 4);
    }
}
