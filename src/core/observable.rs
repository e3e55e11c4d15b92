use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Mask matching every notification
pub const MASK_ALL: u32 = u32::MAX;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Observer<T> {
    id: u64,
    mask: u32,
    callback: Callback<T>,
}

struct Registry<T> {
    observers: RefCell<Vec<Observer<T>>>,
    next_id: Cell<u64>,
}

/// Type-erased view of a registry so a `Subscription` does not carry `T`
trait ObserverSet {
    fn remove(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<T> ObserverSet for Registry<T> {
    fn remove(&self, id: u64) -> bool {
        // Drop the callback outside the borrow: it may own subscriptions to this registry
        let removed = {
            let mut observers = self.observers.borrow_mut();
            observers
                .iter()
                .position(|o| o.id == id)
                .map(|index| observers.remove(index))
        };
        removed.is_some()
    }

    fn contains(&self, id: u64) -> bool {
        self.observers.borrow().iter().any(|o| o.id == id)
    }
}

/// Single-threaded publish/subscribe channel.
///
/// Observers run synchronously in registration order. A notification works on
/// a snapshot of the observer list, so observers added or removed while it is
/// running only see (or miss) the next notification.
pub struct Observable<T> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Register an observer for every notification
    pub fn add<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.add_with_mask(MASK_ALL, callback)
    }

    /// Register an observer that only runs when the notification mask overlaps `mask`
    pub fn add_with_mask<F>(&self, mask: u32, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.observers.borrow_mut().push(Observer {
            id,
            mask,
            callback: Rc::new(callback),
        });

        let registry: Rc<dyn ObserverSet> = self.registry.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    /// Notify every observer. Returns how many were called.
    pub fn notify(&self, value: &T) -> usize {
        self.notify_with_mask(value, MASK_ALL)
    }

    pub fn notify_with_mask(&self, value: &T, mask: u32) -> usize {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .observers
            .borrow()
            .iter()
            .filter(|o| o.mask & mask != 0)
            .map(|o| Rc::clone(&o.callback))
            .collect();

        for callback in &callbacks {
            callback(value);
        }
        callbacks.len()
    }

    pub fn has_observers(&self) -> bool {
        !self.registry.observers.borrow().is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.registry.observers.borrow().len()
    }

    /// Remove every observer. Outstanding subscriptions become inactive.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.registry.observers.borrow_mut());
        drop(drained);
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped observer registration. Dropping it removes the observer.
#[must_use = "dropping a Subscription immediately removes the observer"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn ObserverSet>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the observer is still registered with a live observable
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }

    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
