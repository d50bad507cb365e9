//! Key sequences for interactive sessions.
//!
//! These are the bytes a terminal sends for the corresponding keys, ready to
//! pass to [`crate::InteractiveSession::send_key`].

/// Up arrow.
pub const KEY_UP: &str = "\x1b[A";

/// Down arrow.
pub const KEY_DOWN: &str = "\x1b[B";

/// Right arrow.
pub const KEY_RIGHT: &str = "\x1b[C";

/// Left arrow.
pub const KEY_LEFT: &str = "\x1b[D";

/// Enter.
pub const KEY_ENTER: &str = "\n";

/// End of input (Ctrl+D).
pub const KEY_EOF: &str = "\x04";
