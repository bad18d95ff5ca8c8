//! Run with `RUST_LOG=eml_header=trace cargo run --example trace --features tracing-recover,tracing-discard`
use std::io::Read;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), eml_header::EMLError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eml_header=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let mut reader = &input[..];
    let mut diags: Vec<eml_header::Diagnostic> = vec![];
    let headers = eml_header::header::read_header(&mut reader, &mut diags)?;

    let decoder = eml_header::HeaderDecoder::default();
    for name in headers.names() {
        for value in headers.get_all(name) {
            let canonical = decoder.reencode_header(value.as_bytes(), &mut diags);
            println!("{}: {}", name, canonical);
        }
    }
    for diag in &diags {
        eprintln!("{}", diag);
    }
    Ok(())
}
