//! Stack safety for deep recursion.
//!
//! Forcing a long chain of unforced thunks, or a deeply recursive Brewin
//! function, recurses once per link. The `stacker` crate grows the stack on
//! demand so those programs hit `max_call_depth` (or finish) instead of
//! overflowing the native stack.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
