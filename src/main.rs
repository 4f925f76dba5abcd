use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::feed::BridgeClient;
use crate::router::{handle, App};
use astra::Server;
use std::net::SocketAddr;

mod config;
mod engine;
mod errors;
mod feed;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Upstream feed configuration comes from the environment, here and
    // only here. Everything downstream gets it passed in explicitly.
    let base_url = match std::env::var("BRIDGE_BASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("❌ BRIDGE_BASE_URL not set");
            std::process::exit(1);
        }
    };
    let api_key = match std::env::var("BRIDGE_API_KEY") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("❌ BRIDGE_API_KEY not set");
            std::process::exit(1);
        }
    };

    let featured_ids: Vec<String> = std::env::var("FEATURED_IDS")
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    // 2️⃣ Build the feed client and the engine around it
    let client = match BridgeClient::new(&base_url, &api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Feed client init failed: {e}");
            std::process::exit(1);
        }
    };

    let app = App {
        engine: Engine::new(client, EngineConfig::default()),
        featured_ids,
    };

    // 3️⃣ Start the server
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("❌ Invalid BIND_ADDR: {e}");
            std::process::exit(1);
        });
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests, passing the app handle into the closure
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
