use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// In-memory todo REST service.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Start with an empty list instead of the example todos.
    #[arg(long)]
    pub no_seed: bool,

    /// Log filter, e.g. `debug` or `todo_back=debug,tower_http=info`.
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["back"]).unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([0; 4], 8080)));
        assert!(!config.no_seed);
        assert_eq!(config.log, "info");
    }

    #[test]
    fn overrides() {
        let config =
            Config::try_parse_from(["back", "--host", "127.0.0.1", "-p", "3000", "--no-seed"])
                .unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(config.no_seed);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["back", "--port", "http"]).is_err());
    }
}
