use std::env;
use serde::{Deserialize, Serialize};

pub const ENV_ENVIRONMENT: &str = "PEOPLE_ENV";
pub const ENV_PERSONS_TABLE: &str = "PEOPLE_PERSONS_TABLE";
pub const ENV_EMAILS_TABLE: &str = "PEOPLE_EMAILS_TABLE";
pub const ENV_LOCAL_ENDPOINT: &str = "PEOPLE_LOCAL_ENDPOINT";
pub const ENV_LISTEN_ADDR: &str = "PEOPLE_LISTEN_ADDR";
pub const ENV_STORE: &str = "PEOPLE_STORE";
pub const ENV_LOG_LEVEL: &str = "PEOPLE_LOG_LEVEL";

// Configuration abstracts config options for the person service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub environment: String,
    pub persons_table: String,
    pub emails_table: String,
    // endpoint of DynamoDB Local, only used by the local store
    pub local_endpoint: String,
    // serve plain HTTP on this address instead of the lambda runtime
    pub listen_addr: Option<String>,
}

impl Configuration {
    pub fn new(environment: &str) -> Self {
        Configuration {
            environment: environment.to_string(),
            persons_table: "persons".to_string(),
            emails_table: "person_emails".to_string(),
            local_endpoint: "http://localhost:8000".to_string(),
            listen_addr: None,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Configuration::new(
            env::var(ENV_ENVIRONMENT).unwrap_or_else(|_| "dev".to_string()).as_str());
        if let Ok(table) = env::var(ENV_PERSONS_TABLE) {
            config.persons_table = table;
        }
        if let Ok(table) = env::var(ENV_EMAILS_TABLE) {
            config.emails_table = table;
        }
        if let Ok(endpoint) = env::var(ENV_LOCAL_ENDPOINT) {
            config.local_endpoint = endpoint;
        }
        config.listen_addr = env::var(ENV_LISTEN_ADDR).ok().filter(|addr| !addr.is_empty());
        config
    }
}
