//! Contact data providers.

mod apollo;
mod common;

pub use apollo::{ApolloClient, API_KEY_ENV};
pub use common::resolve_api_key;
