//! Service implementations

pub mod csv_store;

#[cfg(test)]
pub mod tests;

pub use csv_store::RealCsvStore;
