use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the payroll record store.
    pub api_url: String,
    /// Directory payslips are written to.
    pub payslip_dir: String,
    /// Directory the rolling log file lives in.
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_url: env::var("PAYDESK_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            payslip_dir: env::var("PAYDESK_PAYSLIP_DIR").unwrap_or_else(|_| ".".to_string()),
            log_dir: env::var("PAYDESK_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
