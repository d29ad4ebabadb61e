use std::net::SocketAddr;

use tokio::net::TcpListener;

use camwatch::config::Config;

pub async fn spawn_server(cfg: Config) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(camwatch::serve(cfg, listener, std::future::pending()));
    addr
}

pub async fn spawn_default_server() -> SocketAddr {
    spawn_server(Config::default()).await
}
