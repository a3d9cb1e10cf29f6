//! Interrupt handling (Ctrl+C).
//!
//! SIGINT must not terminate the shell: during line reading it aborts the
//! partially-typed line, and while a child is running it is the child's to
//! act on (the handler here is reset to the default disposition across
//! exec, so children die from it normally). The handler only records a flag
//! that the REPL polls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static INSTALLED: OnceLock<()> = OnceLock::new();
static SIGINT_SEEN: AtomicBool = AtomicBool::new(false);

pub fn install() {
    INSTALLED.get_or_init(|| {
        // The closure runs in signal context; a store is all it may do.
        unsafe {
            let _ = signal_hook::low_level::register(signal_hook::consts::SIGINT, || {
                SIGINT_SEEN.store(true, Ordering::SeqCst);
            });
        }
    });
}

pub fn take() -> bool {
    SIGINT_SEEN.swap(false, Ordering::SeqCst)
}
