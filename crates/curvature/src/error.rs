/// Errors from fork selection.
#[derive(Debug, thiserror::Error)]
pub enum CurvatureError {
    #[error("cannot select from an empty fork batch")]
    EmptyBatch,
}
