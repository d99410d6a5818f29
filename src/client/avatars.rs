use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use crate::client::{ClientError, ProxyClient};
use crate::upstream::models::Avatar;

/// The public-avatar fetch a list view starts once when it is created.
/// Dropping the feed aborts the request if it is still in flight.
pub struct AvatarFeed {
    handle: Option<JoinHandle<Result<Vec<Avatar>, ClientError>>>,
}

impl AvatarFeed {
    pub fn spawn(client: ProxyClient) -> Self {
        let handle = tokio::spawn(async move { client.list_avatars().await });
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// A handle that can observe or cancel the fetch independently of the feed.
    pub fn abort_handle(&self) -> Option<AbortHandle> {
        self.handle.as_ref().map(JoinHandle::abort_handle)
    }

    pub async fn wait(mut self) -> Result<Vec<Avatar>, ClientError> {
        let handle = self.handle.take().ok_or(ClientError::Cancelled)?;
        match handle.await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Cancelled),
        }
    }
}

impl Drop for AvatarFeed {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("Aborting in-flight avatar fetch");
            }
            handle.abort();
        }
    }
}
