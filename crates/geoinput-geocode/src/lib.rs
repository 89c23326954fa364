//! HTTP client for the address autocomplete and search endpoints.

pub mod client;
pub mod error;
pub mod http;
pub mod lookup;
pub mod types;

pub use client::GeocodeClient;
pub use error::{GeocodeError, Result};
pub use lookup::lookup_coordinates;
pub use types::GeocodeResponse;
