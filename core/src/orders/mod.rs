// storefront/src/orders/mod.rs

//! The order aggregate: placement (reserve, price, persist, or roll back) and
//! the store that keeps placed orders.

pub mod placement;
pub mod store;

pub use placement::{CheckoutCtxData, OrderPlacement};
pub use store::{InMemoryOrderStore, OrderStore};
