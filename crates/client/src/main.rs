//! Tactics demo binary.
//!
//! Runs a scripted turn on the built-in skirmish map and prints the activity
//! log as JSON lines on stdout. Logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug cargo run -p tactics-client
//! TACTICS_LOG_DIR=./logs TACTICS_SHOOT_COST=3 cargo run -p tactics-client
//! ```

use anyhow::Result;
use tactics_client::chain::{self, MockChain};
use tactics_client::{logging, scenario, session};
use tactics_runtime::{Engine, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = RuntimeConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging()?;
    tracing::info!(?config, "starting tactics demo");

    // 3. Build the battlefield and engine
    let (state, roster) = scenario::skirmish()?;
    let mut engine = Engine::new(state, config);

    // 4. Wire the chain stand-in
    let mut chain = chain::spawn(MockChain::default());
    chain::forward_attacks(&mut engine, &chain);

    // 5. Run the scripted session
    session::run(&mut engine, &roster, &mut chain).await?;

    for entry in engine.activity().entries() {
        println!("{}", serde_json::to_string(entry)?);
    }

    // The bus subscription holds a request sender; release it so the
    // resolver sees its channel close.
    drop(engine);
    chain.shutdown().await;
    tracing::info!("demo complete");
    Ok(())
}
