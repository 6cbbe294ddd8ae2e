use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared, one-way cancellation flag.
///
/// Clones observe the same flag. Raising it is sticky: once cancelled, the
/// token stays cancelled for the rest of its life. Consumers poll it between
/// units of work; nothing is interrupted mid-operation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Returns `true` if this call raised it, `false` if it
    /// was already raised.
    pub fn cancel(&self) -> bool {
        !self.flag.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_cancel_reports_first_raise_only() {
        let token = CancelToken::new();
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }
}
