//! Ctrl+C handling for the tail command.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status after a second Ctrl+C (128 + SIGINT).
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Set up Ctrl+C handler that sets the interrupted flag.
///
/// Cancellation is only observed between lines, so a second Ctrl+C exits
/// immediately in case the stream has gone quiet. If the handler cannot be
/// installed the failure is logged and the returned flag is never raised by
/// a signal.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    let installed = ctrlc::set_handler(move || {
        if interrupted_clone.swap(true, Ordering::SeqCst) {
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
    });
    if let Err(e) = installed {
        tracing::warn!(error = %e, "Failed to install Ctrl+C handler; the stream cannot be cancelled");
    }

    interrupted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_logged_not_fatal() {
        // Only one handler may exist per process; the second call fails.
        let first = setup_interrupt_handler();
        let second = setup_interrupt_handler();

        assert!(!first.load(Ordering::SeqCst));
        assert!(!second.load(Ordering::SeqCst));

        second.store(true, Ordering::SeqCst);
        assert!(!first.load(Ordering::SeqCst));
    }
}
