// This binary crate is intentionally minimal.
// All GAN and color-pipeline logic lives in the library (src/lib.rs and its modules).
// Run the headless demo with:
//   cargo run --example abstract_art
fn main() {
    println!("artgan: a from-scratch generative adversarial art toy in Rust.");
    println!("Run `cargo run --example abstract_art` for a headless demo,");
    println!("or `cargo run --bin studio --release` for the browser UI.");
}
