//! Engine error surface.

use thiserror::Error;

/// Failures an engine operation can surface to the caller. Gameplay refusals
/// (not enough stamina, full inventory, no grave to retrieve) are ordinary
/// result branches, never errors.
#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("repository operation failed")]
    Repository(#[source] E),
}

impl<E> EngineError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    pub(crate) const fn repo(err: E) -> Self {
        Self::Repository(err)
    }
}
