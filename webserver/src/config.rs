//! Dashboard configuration
//!
//! Command-line flags win over the environment (`.env` is loaded first by
//! `main`):
//! - APP_PASSWORD: shared access password (default: admin)
//! - ORDERS_FILE: order file path (default: cleaned_revenue_data.csv)

use std::net::SocketAddr;
use std::path::PathBuf;

use shared::{ProcessId, process_warn};

use crate::error::{WebServerError, WebServerResult};

pub const DEFAULT_PASSWORD: &str = "admin";
pub const DEFAULT_ORDERS_FILE: &str = "cleaned_revenue_data.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub bind_address: SocketAddr,
    pub orders_file: PathBuf,
    pub password: String,
}

impl DashboardConfig {
    /// Resolve from flags and an environment lookup
    pub fn resolve<F>(host: &str, port: u16, data_file: Option<String>, lookup: F) -> WebServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid bind address {}:{}: {}", host, port, e)))?;

        let orders_file = data_file
            .or_else(|| lookup("ORDERS_FILE"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORDERS_FILE.to_string());

        let password = match lookup("APP_PASSWORD").filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => {
                process_warn!(
                    ProcessId::current(),
                    "⚠️ APP_PASSWORD not set, using the default password"
                );
                DEFAULT_PASSWORD.to_string()
            }
        };

        Ok(Self {
            bind_address,
            orders_file: PathBuf::from(orders_file),
            password,
        })
    }

    pub fn from_env(host: &str, port: u16, data_file: Option<String>) -> WebServerResult<Self> {
        Self::resolve(host, port, data_file, |key| std::env::var(key).ok())
    }
}
