//! Service implementations

pub mod session_registry;

#[cfg(test)]
pub mod tests;

pub use session_registry::RealSessionRegistry;
