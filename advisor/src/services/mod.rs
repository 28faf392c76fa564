//! Service implementations

pub mod openai_client;

#[cfg(test)]
pub mod tests;

pub use openai_client::RealAdvisorClient;
