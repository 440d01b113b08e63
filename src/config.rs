use std::path::PathBuf;
use std::time::Duration;

/// Connection settings shared by every lookup request.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub verify_tls: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            proxy_url: None,
            verify_tls: true,
        }
    }
}

/// Settings for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cep_column: String,
    pub flush_size: usize,
    pub delay: Duration,
    pub http: HttpConfig,
}

impl EnrichConfig {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            cep_column: "CEP".to_string(),
            flush_size: 100,
            delay: Duration::from_millis(50),
            http: HttpConfig::default(),
        }
    }
}
