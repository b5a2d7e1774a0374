//! Pure data structures shared by the catalog, the storage layer and the cart actor.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
