//! Functional core for the products service.
//!
//! Pure types and functions with no I/O: the [`product::Product`] entity and
//! its validation, plus the [`storage::ProductRepository`] seam that storage
//! backends implement.

pub mod product;
pub mod storage;
