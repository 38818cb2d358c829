/// artgan Studio
///
/// A browser front end for the adversarial art generator, served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Flow: Train (live SSE loss stream) > Generate > adjust contrast / hue /
/// saturation sliders (re-rendered from the same tensor) > Save PNG.

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use state::StudioState;

fn main() {
    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    // A generator/discriminator shape mismatch is fatal before the first
    // request is ever served.
    let studio_state = match StudioState::new() {
        Ok(s) => s,
        Err(reason) => {
            eprintln!("cannot start studio: {reason}");
            std::process::exit(1);
        }
    };
    let shared_state = Arc::new(Mutex::new(studio_state));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          artgan Studio                       ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Flow: Train > Generate > Adjust > Save      ║");
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for the entire training duration) does not stall
    // regular page loads and frame renders.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
