//! Global constants used throughout the parcelgen codebase.

use std::time::Duration;

/// Timeout for waiting on another caller's in-flight execution (10 seconds).
///
/// A caller that finds a transaction already running waits for its completion
/// notification. If the notification does not arrive within this window the
/// waiter assumes the running execution hung and proceeds to compute on its
/// own. Generation tasks are pure and in-memory, so hitting this timeout
/// indicates a misbehaving collaborator rather than ordinary load.
pub const PENDING_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);
