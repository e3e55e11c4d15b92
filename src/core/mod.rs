pub mod input_adapter;
pub mod observable;

pub use input_adapter::PointerInputAdapter;
pub use observable::{Observable, Subscription, MASK_ALL};
