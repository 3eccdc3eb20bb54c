use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum HeaderError {
    #[error("header error")]
    BinaryError(#[from] binary_helpers::bin_error::BinaryError),
    #[error("provided slice length ({actual}) does not match the expected length ({expected})")]
    HeaderSliceSizeMismatch { actual: usize, expected: usize },
}
