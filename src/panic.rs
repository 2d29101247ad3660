//! Panic handling for example bodies and hooks.
//!
//! Assertions in examples fail by panicking, so every body and hook is run
//! inside [`catch`], which turns both panics and returned errors into a
//! [`Caught`] value.
//!
//! To attribute a panic to a source line, a process wide panic hook is
//! installed the first time [`catch`] is used. While a thread is inside
//! [`catch`], the hook records the panic location for that thread and prints
//! nothing. Panics on any other thread are forwarded to the hook that was
//! installed before.

use std::{
    any::Any,
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe, PanicHookInfo, catch_unwind},
    sync::Once,
};

use crate::{callsite::Callsite, example::ExampleResult};

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static LAST_LOCATION: RefCell<Option<Callsite>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            if CAPTURING.get() {
                let location = info.location().map(Callsite::from);
                LAST_LOCATION.set(location);
                return;
            }
            previous(info)
        }));
    });
}

/// Restores the previous capture state of the current thread on drop, so
/// nested [`catch`] calls behave.
struct CaptureGuard(bool);

impl CaptureGuard {
    fn enter() -> Self {
        LAST_LOCATION.set(None);
        Self(CAPTURING.replace(true))
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURING.set(self.0);
    }
}

/// A failure caught while running a body or hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caught {
    pub message: String,
    /// Where the panic happened. `None` for returned errors.
    pub location: Option<Callsite>,
    pub panicked: bool,
}

/// The message of a panic, if the payload carries one.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return message.to_string();
    }
    match payload.downcast_ref::<String>() {
        Some(message) => message.clone(),
        None => String::from("<non-string panic payload>"),
    }
}

/// Run `f`, catching panics and returned errors.
pub fn catch<F: FnOnce() -> ExampleResult>(f: F) -> Result<(), Caught> {
    install_hook();
    let guard = CaptureGuard::enter();
    let result = catch_unwind(AssertUnwindSafe(f));
    let location = LAST_LOCATION.take();
    drop(guard);

    match result {
        Ok(ExampleResult(Ok(()))) => Ok(()),
        Ok(ExampleResult(Err(message))) => Err(Caught {
            message,
            location: None,
            panicked: false,
        }),
        Err(payload) => Err(Caught {
            message: panic_message(&*payload),
            location,
            panicked: true,
        }),
    }
}
