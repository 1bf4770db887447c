//! Interactive stack table viewer.
//!
//! ```bash
//! cargo run
//! STACK_TABLES_COLOR=never STACK_TABLES_LOG=stack.jsonl cargo run
//! ```

use std::io;

use stack_tables::{AppConfig, ExpressionParser, Session, TableRenderer};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let logger = config.logger()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let renderer = TableRenderer::new(config.renderer.clone());

    let mut session = Session::new(stdin.lock(), stdout.lock(), renderer)
        .with_parser(ExpressionParser::new(config.expression))
        .with_config(config.session.clone())
        .with_logger(logger);

    session.run()?;
    Ok(())
}
