//! Error types for the reusable pool

use thiserror::Error;

/// Failure conditions reported by pool operations.
///
/// `Exhausted` and `Duplicate` carry fixed user-facing messages; callers that
/// need to branch should match on the variant rather than the text.
#[derive(Error, Debug, Clone)]
pub enum PoolError {
    #[error("No hay más instancias reutilizables disponibles. Reintentalo más tarde")]
    Exhausted,

    #[error("Ya existe esa instancia en el pool.")]
    Duplicate,

    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

pub type PoolResult<T> = Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_is_fixed() {
        assert_eq!(
            PoolError::Exhausted.to_string(),
            "No hay más instancias reutilizables disponibles. Reintentalo más tarde"
        );
    }

    #[test]
    fn duplicate_message_is_fixed() {
        assert_eq!(
            PoolError::Duplicate.to_string(),
            "Ya existe esa instancia en el pool."
        );
    }

    #[test]
    fn timeout_message_includes_duration() {
        let msg = PoolError::Timeout(std::time::Duration::from_secs(5)).to_string();
        assert!(msg.contains("5s"), "unexpected message: {msg}");
    }
}
