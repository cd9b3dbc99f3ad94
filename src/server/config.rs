use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    /// Whether `/api/dashboard` and the dashboard page include the metrics mapping.
    pub summary_includes_metrics: bool,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            summary_includes_metrics: true,
            enable_cors: true,
        }
    }
}
