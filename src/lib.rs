//! # Cart Store
//!
//! > **A stock-aware shopping cart that survives reloads.**
//!
//! This crate holds the cart state of a storefront client: add a product,
//! remove it, change its quantity. Every change is checked against the stock
//! service, committed atomically, and written to storage so the next session
//! starts where this one ended.
//!
//! ## 🏗️ Design
//!
//! ### One owner, sequential requests
//! The cart lives inside a [`CartActor`](cart_actor::CartActor) running in its
//! own Tokio task. UI code talks to it through a cloneable
//! [`CartClient`](clients::CartClient). Requests are handled one at a time,
//! including the catalog lookups they await, so mutations never interleave and
//! no lock guards the cart.
//!
//! ### Copy-on-write commits
//! A [`Cart`](model::Cart) is never modified in place. Each operation builds
//! the next cart from the current snapshot; only when the whole operation
//! succeeds is it persisted and then published. A failure at any point (stock
//! check, catalog fetch, storage write) leaves both the visible cart and the
//! stored snapshot untouched.
//!
//! ### Failures are values
//! Every operation returns `Result<Arc<Cart>, CartError>` and also hands a
//! [`Notice`](cart_actor::Notice) to the configured
//! [`Notifier`](cart_actor::Notifier) for display. Nothing panics on a bad
//! request.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - `ProductId`, `Product`, `Stock`, `LineItem`, `Cart`
//! - [`cart_actor`] - the actor, its messages, errors and notices
//! - [`clients`] - the `CartClient` handle
//! - [`catalog`] - the `Catalog` trait and an in-memory catalog
//! - [`storage`] - the `CartStorage` trait, memory and file backends, snapshot format
//! - [`lifecycle`] - `CartSystem` (hydrate, spawn, shutdown) and tracing setup
//! - [`config`] - `CartConfig`
//! - [`mock`] - test doubles for every collaborator
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Persist the demo cart between runs
//! CART_DATA_DIR=./.cart RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod storage;
