//! Value types shared by the stores and the storefront.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Price, PriceError, format_currency};
