//! x86_64 implementation of the one-way switch.

use std::arch::naked_asm;

use crate::context::Context;

/// Jump onto the stack described by `ctx` and never come back.
///
/// Loads the context's stack pointer into `rsp`, then executes `ret`.
/// `ret` pops the value at the new top of stack and jumps to it
/// unconditionally, so control lands on the entry address the stack
/// builder wrote there, as if it had been called but without any `call`
/// having pushed a return address.
///
/// # Safety
/// `ctx` must point to a valid [`Context`] whose `sp` field holds a
/// 16-byte-aligned address inside a live stack buffer, and the 8 bytes at
/// that address must hold the address of an `extern "C" fn() -> !`.
/// Violating any of this is undefined behavior: an arbitrary jump, a
/// crash, or memory corruption. There is no recovery path and the call
/// site is never returned to.
#[unsafe(naked)]
pub unsafe extern "C" fn launch(_ctx: *const Context) -> ! {
    naked_asm!(
        // Point the CPU at the prepared stack (ctx in rdi, sp at offset 0)
        "mov rsp, [rdi + 0x00]",
        // Pop the entry address and jump to it
        "ret",
    );
}
