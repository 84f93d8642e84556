//! Invariant violations.
//!
//! Broken invariants are programming errors. Debug builds (and therefore tests)
//! fail fast; release builds log and let the caller fall through to a no-op.

use bevy::prelude::*;

#[track_caller]
pub fn violated(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    if cfg!(debug_assertions) {
        panic!("invariant violated: {msg}");
    }
    warn!("invariant violated: {msg}");
}
