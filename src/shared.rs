//! Display shared between contexts.
//!
//! The controller's address pointer persists between transfers, so two
//! callers interleaving commands corrupt each other's addressing. Firmware
//! that reaches the display from an interrupt handler and the main loop
//! parks it here and takes the critical section for every access.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::display::T6963;

pub struct SharedDisplay<B> {
    slot: Mutex<RefCell<Option<T6963<B>>>>,
}

impl<B> SharedDisplay<B> {
    pub const fn new() -> Self {
        Self { slot: Mutex::new(RefCell::new(None)) }
    }

    /// Park `lcd`, returning whatever was parked before.
    pub fn install(&self, lcd: T6963<B>) -> Option<T6963<B>> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).replace(lcd))
    }

    /// Take the display back out, e.g. to close it.
    pub fn take(&self) -> Option<T6963<B>> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the display inside a critical section.
    /// `None` if nothing is installed.
    ///
    /// `f` must not call back into this `SharedDisplay` (`with`, `install`,
    /// `take`, `is_installed`): the slot is already borrowed and the inner
    /// `RefCell` panics.
    pub fn with<R>(&self, f: impl FnOnce(&mut T6963<B>) -> R) -> Option<R> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).as_mut().map(f))
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow_ref(cs).is_some())
    }
}

impl<B> Default for SharedDisplay<B> {
    fn default() -> Self {
        Self::new()
    }
}
