//! Pure functions for mapping repository errors to HTTP status codes.

use super::{RepositoryError, RepositoryErrorKind};

/// Maps a [`RepositoryError`] to an HTTP status code by its kind:
///
/// - `Conflict` -> 500 (Internal Server Error)
/// - `NotFound` -> 404 (Not Found)
/// - `Transient` -> 500 (Internal Server Error)
/// - `Unknown` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use products_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::AlreadyExists {
///     entity_type: "Product",
///     id: "123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 500);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error.kind() {
        // A failed conditional create is a store failure to the client; the
        // body still says the record already exists.
        RepositoryErrorKind::Conflict => 500,
        RepositoryErrorKind::NotFound => 404,
        RepositoryErrorKind::Transient => 500,
        RepositoryErrorKind::Unknown => 500,
    }
}
