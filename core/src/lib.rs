// storefront/src/lib.rs

//! Storefront core: catalog resources, the inventory ledger and the order
//! placement workflow of an electronics storefront.
//!
//!  - [`repository`]: one generic CRUD abstraction (`Resource` + `Repository<R>`)
//!    serving categories, products, reviews, product images and users.
//!  - [`inventory`]: the only component that moves stock. `reserve` is an
//!    atomic check-and-decrement per product.
//!  - [`orders`]: `OrderPlacement::place_order`, all or nothing. Either every
//!    line is reserved and the order persisted with a fixed total, or every
//!    reservation of the call is released and nothing is stored.
//!  - [`pipeline`]: the small step engine placement is built on: named steps,
//!    shared [`ContextData`], and rollback handlers run in reverse on failure.
//!
//! Backends: everything ships with an in-memory implementation. The
//! `postgres` feature derives `sqlx::FromRow` on the flat models so a server
//! crate can provide relational implementations of the same traits.

pub mod catalog;
pub mod core;
pub mod error;
pub mod inventory;
pub mod model;
pub mod orders;
pub mod pipeline;
pub mod repository;

// --- Re-exports for the Public API ---

pub use crate::catalog::CatalogStore;
pub use crate::core::context_data::ContextData;
pub use crate::core::step::{Handler, StepDef};
pub use crate::error::{
  LedgerError, OrderPlacementError, PipelineError, StoreError, StoreResult, ValidationError,
};
pub use crate::inventory::{InventoryLedger, Reservation};
pub use crate::orders::{InMemoryOrderStore, OrderPlacement, OrderStore};
pub use crate::pipeline::Pipeline;
pub use crate::repository::{InMemoryRepository, Repository, Resource};
