use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::types::SurfaceSize;

type Listener = Box<dyn FnMut(SurfaceSize)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Resize notifications for one container. Listeners stay registered only
/// as long as their `ResizeSubscription` lives.
#[derive(Clone, Default)]
pub struct ResizeHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(SurfaceSize) + 'static) -> ResizeSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        ResizeSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `size` to every live listener and returns how many ran.
    pub fn notify(&self, size: SurfaceSize) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        for (_, listener) in listeners.entries.iter_mut() {
            listener(size);
        }
        listeners.entries.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

#[must_use = "dropping the subscription detaches the listener"]
pub struct ResizeSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl ResizeSubscription {
    pub fn detach(self) {}
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Tracks the pixel size of the drawing surface and follows its container.
pub struct SurfaceManager {
    size: Rc<Cell<SurfaceSize>>,
    subscription: Option<ResizeSubscription>,
}

impl SurfaceManager {
    pub fn attach(measured: SurfaceSize, hub: &ResizeHub) -> Self {
        let size = Rc::new(Cell::new(measured));
        let recorded = Rc::clone(&size);
        let subscription = hub.subscribe(move |new_size| {
            log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
            recorded.set(new_size);
        });
        Self {
            size,
            subscription: Some(subscription),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size.get()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }
    }
}
