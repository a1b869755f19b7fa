//! Page-wide handles.
//!
//! Session state itself lives in the `Bridge`; this only keeps the controller
//! reachable from the JS exports. WASM is single-threaded, so `thread_local!`
//! is the whole page.

use std::cell::RefCell;
use std::rc::Rc;
use ws_session_core::Bridge;
use ws_session_core::endpoint::{LocalTask, Spawner};

thread_local! {
    static BRIDGE: RefCell<Option<Rc<Bridge>>> = const { RefCell::new(None) };
}

pub fn bridge() -> Option<Rc<Bridge>> {
    BRIDGE.with(|b| b.borrow().clone())
}

pub fn set_bridge(bridge: Rc<Bridge>) {
    BRIDGE.with(|b| *b.borrow_mut() = Some(bridge));
}

/// Spawns onto the browser's microtask queue.
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
