//! Core systems for gridkit.
//!
//! This crate provides the foundational pieces shared by the gridkit crates:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Values that report whether a write changed them
//! - **Deferred Queue**: Requests posted from inside a handler and applied
//!   once the current dispatch has finished
//! - **Logging**: `tracing` target names for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use gridkit_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod deferred;
pub mod logging;
pub mod property;
pub mod signal;

pub use deferred::{DeferredQueue, TaskId};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
