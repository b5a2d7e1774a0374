//! # System Lifecycle
//!
//! Starting, wiring and stopping a cart store.
//!
//! ## Startup
//!
//! [`CartSystem::start`] runs in a fixed order:
//!
//! 1. **Hydrate** - read the snapshot under the configured key; missing or malformed data yields an empty cart, an unreadable backend aborts the start
//! 2. **Create** - build the actor and its client around the hydrated cart
//! 3. **Wire** - inject catalog, storage and notifier via `run(context)`
//! 4. **Spawn** - run the actor in its own Tokio task
//!
//! ## Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the request channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` after queued requests are handled
//! 3. **Await completion** - [`CartSystem::shutdown`] waits for the task
//!
//! The cart itself is never torn down: the last committed snapshot stays in
//! storage and is hydrated by the next start.
//!
//! ## Observability
//!
//! See the [`tracing`](self::tracing) module for [`setup_tracing`] and the events emitted.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::*;
