use std::io;

use assetctl::repository::rest::RestConnection;
use assetctl::App;

#[tokio::main]
async fn main() {
    // Logging goes to stderr so it never mixes into the report stream;
    // quiet unless RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let stdin = io::stdin();
    let mut app = App::new(stdin.lock(), io::stdout());

    // All user-facing text has already been printed by the time an error
    // comes back; the exit code is the only thing left to surface.
    if app.run(&args, RestConnection::new).await.is_err() {
        std::process::exit(1);
    }
}
