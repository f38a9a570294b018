//! Interrupt handling while a child build runs.
//!
//! Like `system(3)`, the orchestrator ignores SIGINT and SIGQUIT while it
//! waits for a child. A Ctrl-C reaches the child through the terminal's
//! process group, the child's exit status flows through the normal error
//! path, and the development rebuild of the assets still runs. Outside a
//! child the signals keep their default action.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Switch between "signals terminate us" and "signals are held for the child".
///
/// `Default` gives a gate with no handlers installed, which leaves signal
/// dispositions untouched.
#[derive(Debug, Clone)]
pub struct InterruptGate {
    interruptible: Arc<AtomicBool>,
    received: Arc<AtomicBool>,
}

impl Default for InterruptGate {
    fn default() -> Self {
        Self {
            interruptible: Arc::new(AtomicBool::new(true)),
            received: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InterruptGate {
    /// Install SIGINT/SIGQUIT handlers for the lifetime of the process.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use signal_hook::consts::{SIGINT, SIGQUIT};
        use signal_hook::flag;

        let gate = Self::default();
        for signal in [SIGINT, SIGQUIT] {
            flag::register(signal, Arc::clone(&gate.received))?;
            flag::register_conditional_default(signal, Arc::clone(&gate.interruptible))?;
        }
        Ok(gate)
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self::default())
    }

    /// Hold interrupts until the returned guard is dropped.
    pub fn hold(&self) -> HeldInterrupts<'_> {
        self.received.store(false, Ordering::SeqCst);
        self.interruptible.store(false, Ordering::SeqCst);
        HeldInterrupts { gate: self }
    }

    pub fn is_interruptible(&self) -> bool {
        self.interruptible.load(Ordering::SeqCst)
    }
}

/// Restores the default signal action on drop.
#[derive(Debug)]
pub struct HeldInterrupts<'a> {
    gate: &'a InterruptGate,
}

impl HeldInterrupts<'_> {
    /// Whether SIGINT or SIGQUIT arrived while held.
    pub fn interrupted(&self) -> bool {
        self.gate.received.load(Ordering::SeqCst)
    }
}

impl Drop for HeldInterrupts<'_> {
    fn drop(&mut self) {
        self.gate.interruptible.store(true, Ordering::SeqCst);
    }
}
