//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate
//! for binaries that host a cart store. Libraries and tests never call it.
//!
//! ## Configuration
//!
//! Compact format with the crate/module prefix hidden (`with_target(false)`).
//! The level comes from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Commits and failures
//! RUST_LOG=debug cargo run     # Every request, stock lookup and snapshot write
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup with the hydrated item count, shutdown
//! - **Requests**: client spans (`add_item`, `remove_item`, `update_amount`) with the product id
//! - **Commits**: operation, product id, distinct items and total units after the change
//! - **Failures**: operation, product id and error, plus the notice sent to the notifier
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Starting cart store items=0
//! INFO Cart actor started key=@RocketShoes:cart items=0
//! INFO Committed operation=add_item product_id=product_1 items=1 units=1
//! WARN Cart operation failed operation=add_item product_id=product_1 error=Insufficient stock for product_1: requested 2, available 1
//! WARN Requested quantity is out of stock operation=add_item product_id=product_1 kind=OutOfStock
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
