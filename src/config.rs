use clap::Parser;

/// Configuration for the address book service, either from command line
/// flags or from environment variables.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "An HTTP address book record service")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "HTTP_ADDRESS", default_value = "127.0.0.1")]
    pub http_address: String,

    /// Port the HTTP server binds to
    #[arg(long, env = "HTTP_PORT", default_value_t = 8080)]
    pub http_port: u16,

    /// SurrealDB connection string
    #[arg(long, env = "SURREAL_DB_CONNECTION", default_value = "ws://localhost:8000")]
    pub surreal_db_connection: String,

    /// Database namespace
    #[arg(long, env = "DB_NAMESPACE", default_value = "addressbook")]
    pub db_namespace: String,

    /// Database name
    #[arg(long, env = "DB_DATABASE", default_value = "addressbook")]
    pub db_database: String,
}

impl Config {
    pub fn http_listen_url(&self) -> String {
        format!("http://{}:{}", self.http_address, self.http_port)
    }
}
