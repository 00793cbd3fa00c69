//! Concrete tasks.

pub mod dot_product;
