//! Shared primitive types used across the session core.

/// A stable, unique identifier for one running panel session.
pub type SessionId = String;

/// Monotonic position of an entry in the session event log.
pub type Seq = u64;
