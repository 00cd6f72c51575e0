//! Concrete alert channels backed by AWS.
//!
//! Each channel wraps an SDK client built once at process start and reused
//! for every send.

pub mod email;
pub mod topic;
