//! Ctrl-C handling for long runs
//!
//! The first Ctrl-C sets a flag the pipeline checks between files, so the file
//! in progress finishes writing both siblings. A second Ctrl-C exits at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Install the handler and return the flag it sets.
///
/// A failure to install (e.g. a handler already registered) is logged and
/// the run proceeds without graceful interruption.
pub fn install() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    let result = ctrlc::set_handler(move || {
        if interrupted_clone.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!("Interrupted: finishing the current file, press Ctrl-C again to abort");
    });

    if let Err(e) = result {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    interrupted
}
