//! Stack construction for the one-way switch.
//!
//! A [`StackBuffer`] owns the raw memory; [`StackBuffer::prepare`] primes it
//! so that jumping into it executes a chosen entry routine.

use log::{debug, trace};

use crate::context::{Context, Entry};

/// Stack alignment required by the calling convention (System V x86_64 and
/// AAPCS64 both want 16 bytes).
pub const STACK_ALIGN: usize = 16;

/// Smallest stack the switch can be demonstrated on.
///
/// Empirical and platform-dependent: 48 bytes is enough for an entry
/// routine that only idles, except on macOS, which needs at least 624.
/// There is no known formula behind the discrepancy; treat this as a
/// configuration constant.
#[cfg(target_os = "macos")]
pub const MIN_STACK_SIZE: usize = 624;
#[cfg(not(target_os = "macos"))]
pub const MIN_STACK_SIZE: usize = 48;

/// Default stack size for entry routines that call real code (64KB)
pub const DEFAULT_STACK_SIZE: usize = 64 * 1024;

/// An exclusively owned, contiguous region of raw memory used as a
/// downward-growing stack.
///
/// The buffer must outlive the switch and everything that then executes on
/// it. Execution never returns in this design, so a launcher either keeps
/// the buffer alive on its own frame or leaks it for the process lifetime.
pub struct StackBuffer {
    buf: Vec<u8>,
}

impl StackBuffer {
    /// Allocate a zero-initialized stack of `size` bytes.
    ///
    /// Sizes below [`MIN_STACK_SIZE`] are out of contract: switching onto
    /// such a stack is undefined behavior, not a recoverable error.
    pub fn new(size: usize) -> Self {
        debug_assert!(
            size >= MIN_STACK_SIZE,
            "stack of {size} bytes is below the platform minimum of {MIN_STACK_SIZE}"
        );
        StackBuffer {
            buf: vec![0u8; size],
        }
    }

    /// Base address of the buffer (lowest address).
    pub fn base(&self) -> *const u8 {
        self.buf.as_ptr()
    }

    /// Size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Prime the stack so that jumping into it executes `entry`.
    ///
    /// Stacks grow downward, so the initial top is one past the end of the
    /// buffer. The top is rounded down to a 16-byte boundary, the
    /// return-address slot is reserved 16 bytes below that, and the entry
    /// address is written at the slot as a 64-bit value. The returned
    /// context's stack pointer is the slot address.
    pub fn prepare(&mut self, entry: Entry) -> Context {
        // Stack grows downward, so start at the top
        let stack_top = self.buf.as_mut_ptr() as usize + self.buf.len();

        // Align to 16 bytes (required by ABI), rounding down
        let aligned_top = stack_top & !(STACK_ALIGN - 1);

        // Reserve the return-address slot below the aligned top
        let slot = aligned_top - STACK_ALIGN;

        debug!(
            "stack buffer {:p}..{stack_top:#x}, aligned top {aligned_top:#x}",
            self.buf.as_ptr()
        );

        unsafe {
            std::ptr::write(slot as *mut u64, entry as usize as u64);
        }
        trace!("entry {:#x} written at slot {slot:#x}", entry as usize);

        Context { sp: slot as u64 }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    extern "C" fn idle() -> ! {
        loop {
            std::hint::spin_loop();
        }
    }

    #[test]
    fn slot_is_16_byte_aligned() {
        for size in [MIN_STACK_SIZE, MIN_STACK_SIZE + 7, 1000, DEFAULT_STACK_SIZE] {
            let mut stack = StackBuffer::new(size);
            let ctx = stack.prepare(idle);
            assert_eq!(ctx.sp as usize % STACK_ALIGN, 0, "size {size}");
        }
    }

    #[test]
    fn slot_lies_inside_the_buffer() {
        let mut stack = StackBuffer::new(MIN_STACK_SIZE);
        let ctx = stack.prepare(idle);
        let base = stack.base() as usize;
        let slot = ctx.sp as usize;
        assert!(slot >= base);
        assert!(slot + 8 <= base + stack.len());
    }

    #[test]
    fn slot_holds_the_entry_address() {
        let mut stack = StackBuffer::new(MIN_STACK_SIZE);
        let ctx = stack.prepare(idle);
        let stored = unsafe { std::ptr::read(ctx.sp as *const u64) };
        assert_eq!(stored, idle as usize as u64);
    }

    #[test]
    fn prepare_round_trips_any_entry_address() {
        extern "C" fn other() -> ! {
            loop {
                std::hint::spin_loop();
            }
        }

        let mut stack = StackBuffer::new(DEFAULT_STACK_SIZE);
        for entry in [idle as Entry, other as Entry] {
            let ctx = stack.prepare(entry);
            let stored = unsafe { std::ptr::read(ctx.sp as *const u64) };
            assert_eq!(stored, entry as usize as u64);
        }
    }

    #[test]
    fn buffer_starts_zeroed() {
        let stack = StackBuffer::new(MIN_STACK_SIZE);
        let bytes = unsafe { std::slice::from_raw_parts(stack.base(), stack.len()) };
        assert!(bytes.iter().all(|&b| b == 0));
    }
}
