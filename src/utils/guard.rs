/// Runs a closure when dropped.
///
/// Used to restore the terminal on every exit path, including panics that
/// unwind through `main`.
///
/// # Examples
///
/// ```
/// use repl_console::utils::guard::ExitGuard;
///
/// let mut restored = false;
/// {
///     let _guard = ExitGuard::new(|| restored = true);
/// }
/// assert!(restored);
/// ```
pub struct ExitGuard<F: FnOnce()> {
    on_exit: Option<F>,
}

impl<F: FnOnce()> ExitGuard<F> {
    pub fn new(f: F) -> Self {
        Self { on_exit: Some(f) }
    }
}

impl<F: FnOnce()> Drop for ExitGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.on_exit.take() {
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_once_on_drop() {
        let count = Cell::new(0);
        {
            let _guard = ExitGuard::new(|| count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_runs_during_unwind() {
        let ran = std::sync::atomic::AtomicBool::new(false);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ExitGuard::new(|| ran.store(true, std::sync::atomic::Ordering::SeqCst));
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(ran.load(std::sync::atomic::Ordering::SeqCst));
    }
}
