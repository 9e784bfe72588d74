//! NeXLet backend - binary entry point.
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    nexlet_backend::run().await;
}
