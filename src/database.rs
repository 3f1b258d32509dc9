//! Record store: connection setup, schema migrations, entities and seeding.
pub mod connection;
pub mod entities;
pub mod migration;
pub mod seed;

#[cfg(test)]
pub mod test_utils;

pub use connection::open_store;
pub use seed::seed_if_empty;
