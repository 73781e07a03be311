use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DATABASE_URL", default = "postgresql://localhost/board_server")]
    pub database_url: String,

    #[envconfig(from = "BOARD_SERVER_PORT", default = "3000")]
    pub server_port: u16,

    #[envconfig(from = "BOARD_MAX_DB_CONNECTIONS", default = "5")]
    pub max_db_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }
}
