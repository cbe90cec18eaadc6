use springboard::{DEFAULT_STACK_SIZE, StackBuffer, launch};

extern "C" fn waking_up() -> ! {
    println!("Entry routine: running on the hand-built stack");
    println!("Entry routine: idling forever");
    loop {
        std::hint::spin_loop();
    }
}

fn main() {
    env_logger::init();

    let mut stack = StackBuffer::new(DEFAULT_STACK_SIZE);
    let ctx = stack.prepare(waking_up);
    println!("Prepared {} byte stack at {:p}, jumping in...", stack.len(), stack.base());

    // Nothing ever returns to free it, so the buffer lives for the rest
    // of the process
    std::mem::forget(stack);

    unsafe { launch(&ctx) };
}
