//! Hidden completion hook for `run --tasks`, called by shell completion
//! scripts with the partial word under the cursor.

use crate::complete;
use crate::session::SessionStore;

/// Prints one suggestion per line on stdout.
///
/// A completion hook must never break the user's shell: every failure mode
/// becomes a diagnostic on stderr and an empty suggestion list, and the
/// process still exits 0.
pub fn complete_tasks(store: &SessionStore, partial: &str) {
    let state = match store.load() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    match complete::complete(state.tasks.as_deref(), partial) {
        Ok(suggestions) => {
            for suggestion in suggestions {
                println!("{suggestion}");
            }
        }
        Err(e) => eprintln!("{e}"),
    }
}
