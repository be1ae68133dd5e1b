// src/main.rs

use std::process;

#[tokio::main]
async fn main() {
    let args = jekyllwatch::cli::parse();
    if let Err(err) = jekyllwatch::run(args).await {
        eprintln!("jekyllwatch error: {err}");
        process::exit(err.exit_code());
    }
}
