//! Read-only client for a merchant's Clover catalog, plus the transform that
//! folds raw categories and items into the category → variation tree served
//! by the API.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod types;

pub use aggregate::aggregate_categories;
pub use client::CloverClient;
pub use error::CloverError;
pub use types::{
    CategoryRef, CloverCategory, CloverItem, CloverMerchant, CloverModifier, CloverModifierGroup,
    CloverVariant, ElementList,
};
