use arbor_curvature::CurvatureError;
use arbor_types::ForkId;

/// Errors surfaced by the runtime facade.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Selection(#[from] CurvatureError),
    #[error("fork {0} not found in the archive")]
    ForkNotFound(ForkId),
}
