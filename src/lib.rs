//! One-way stack switching: build an execution stack in memory and make
//! the CPU start running on it.
//!
//! [`StackBuffer`] allocates the raw memory and writes an entry-point
//! address at a 16-byte-aligned slot near its top. [`launch`] points the
//! stack-pointer register at that slot and executes a return-style jump,
//! so control lands on the entry routine as if it had been called, without
//! any `call` instruction having run. The jump is terminal: the launching
//! call site is never returned to.
//!
//! This is the building block a cooperative scheduler grows out of; the
//! scheduler itself (saving the current stack pointer, resuming, picking
//! the next task) is deliberately not here.
//!
//! # Example
//!
//! ```no_run
//! use springboard::{DEFAULT_STACK_SIZE, StackBuffer, launch};
//!
//! extern "C" fn hello() -> ! {
//!     println!("running on a hand-built stack");
//!     loop {
//!         std::hint::spin_loop();
//!     }
//! }
//!
//! let mut stack = StackBuffer::new(DEFAULT_STACK_SIZE);
//! let ctx = stack.prepare(hello);
//! // Execution on the new stack never ends, so leak the buffer.
//! std::mem::forget(stack);
//! unsafe { launch(&ctx) };
//! ```

pub mod arch;
pub mod context;
pub mod stack;

pub use arch::launch;
pub use context::{Context, Entry};
pub use stack::{DEFAULT_STACK_SIZE, MIN_STACK_SIZE, STACK_ALIGN, StackBuffer};
