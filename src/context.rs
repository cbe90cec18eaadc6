//! The minimal CPU context needed to begin execution on a new stack.

/// Entry point for a launched stack.
///
/// No arguments, and never returns: there is no saved return context below
/// it on the new stack, so returning normally would be undefined behavior.
/// An entry routine ends in an idle loop (or exits the process) instead.
pub type Entry = extern "C" fn() -> !;

/// Saved CPU context for a one-way stack switch.
///
/// Only the stack pointer is recorded. [`launch`](crate::launch) reads the
/// field at a fixed byte offset from assembly, so the layout must be stable
/// and predictable.
#[repr(C)]
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Stack pointer. Must hold a 16-byte-aligned address inside a live
    /// stack buffer, with a valid entry address stored at that address.
    pub sp: u64,
}
