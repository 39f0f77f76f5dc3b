use std::fmt::Display;
use tracing::warn;

/// Fold a result-iteration outcome together with its close-time result.
///
/// A close failure surfaces only when no earlier error is pending; if a
/// primary error is already set the close error is logged and suppressed so
/// it never masks the original failure.
pub fn finish<T, E: Display>(result: Result<T, E>, close: Result<(), E>) -> Result<T, E> {
    match (result, close) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(close_err)) => {
            warn!("suppressed close error after a prior failure: {close_err}");
            Err(primary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_error_surfaces_only_without_a_primary_error() {
        assert_eq!(finish::<_, String>(Ok(1), Ok(())), Ok(1));
        assert_eq!(finish(Ok(1), Err("close".to_string())), Err("close".to_string()));
    }

    #[test]
    fn primary_error_is_never_masked_by_close() {
        let out = finish::<i32, String>(Err("primary".to_string()), Err("close".to_string()));
        assert_eq!(out, Err("primary".to_string()));
    }
}
