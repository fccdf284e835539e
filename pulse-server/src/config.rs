use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pulse-server")]
#[command(about = "Serves host metrics as JSON on GET /metrics")]
pub struct ServerOptions {
    #[arg(long, env = "PULSE_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    #[arg(short, long, env = "PULSE_PORT", default_value_t = 7100)]
    pub port: u16,
}

impl ServerOptions {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
