//! aarch64 implementation of the one-way switch.

use std::arch::naked_asm;

use crate::context::Context;

/// Jump onto the stack described by `ctx` and never come back.
///
/// On aarch64 `ret` branches to the link register rather than popping the
/// stack, so the pop is done by hand: load `sp` from the context, load the
/// entry address from the new top of stack into `lr`, consume the 16-byte
/// slot, then `ret`. The observable effect matches x86_64: control lands
/// on the entry address the stack builder wrote at the slot.
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
    // Argument: x0 = ctx
    naked_asm!(
        // Point the CPU at the prepared stack (sp at offset 0)
        "ldr x9, [x0, #0x00]",
        "mov sp, x9",
        // Pop the entry address into lr and jump to it
        "ldr lr, [sp]",
        "add sp, sp, #16",
        "ret",
    );
}
