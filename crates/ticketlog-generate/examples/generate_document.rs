use ticketlog_generate::output::json::render_document;
use ticketlog_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let count: i64 = match std::env::args().nth(1) {
        Some(value) => value.parse()?,
        None => 5,
    };

    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(2021),
        ..GenerateOptions::default()
    });
    let document = engine.run(count)?;
    println!("{}", String::from_utf8(render_document(&document)?)?);

    Ok(())
}
