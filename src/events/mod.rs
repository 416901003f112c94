//! Battle events and the observers that consume them.

pub mod event;
pub mod observer;

pub use event::BattleEvent;
pub use observer::{BattleObserver, EventLog, NullObserver, TracingObserver};
