//! Browser timers with guaranteed teardown
//!
//! Every handle here owns both the JS timer id and the closure it calls.
//! Dropping the handle clears the timer before the closure is released, so a
//! callback can never run against a torn-down view.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn as_millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}

/// One-shot `setTimeout`
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(after: Duration, f: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let mut f = Some(f);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        });
        let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            as_millis(after),
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web_sys::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

/// Repeating `setInterval`
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(every: Duration, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut()>::new(f);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            as_millis(every),
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }

    /// Stop ticking but keep the closure alive (safe from inside the callback)
    pub fn stop(&self) {
        if let Some(w) = web_sys::window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Delay-then-interval timer behind the headline typewriter
///
/// `on_tick` runs once per interval and returns whether it wants more ticks.
/// Dropping the timer cancels whichever stage is pending.
pub struct RevealTimer {
    _delay: Timeout,
    interval: Rc<RefCell<Option<Interval>>>,
}

impl RevealTimer {
    pub fn start<F>(delay: Duration, every: Duration, on_tick: F) -> Result<Self, JsValue>
    where
        F: FnMut() -> bool + 'static,
    {
        let interval: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

        let slot = interval.clone();
        let delay_timer = Timeout::new(delay, move || {
            let mut on_tick = on_tick;
            let ticker = Rc::downgrade(&slot);
            let started = Interval::new(every, move || {
                if on_tick() {
                    return;
                }
                if let Some(slot) = ticker.upgrade() {
                    if let Some(interval) = slot.borrow().as_ref() {
                        interval.stop();
                    }
                }
            });
            match started {
                Ok(handle) => *slot.borrow_mut() = Some(handle),
                Err(e) => log::error!("Could not start reveal interval: {:?}", e),
            }
        })?;

        Ok(Self {
            _delay: delay_timer,
            interval,
        })
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        if let Some(interval) = self.interval.borrow_mut().take() {
            log::debug!("Reveal timer dropped");
            drop(interval);
        }
    }
}
