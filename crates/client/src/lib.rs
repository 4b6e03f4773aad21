//! Demo host for the tactics engine.
//!
//! # Architecture
//!
//! ```text
//! tactics (binary)
//!   ├─→ Engine (tactics-runtime: modes, event bus, busy latch)
//!   ├─→ Scenario (ASCII skirmish map and roster)
//!   └─→ MockChain (tokio task resolving attacks)
//! ```
//!
//! The binary is the composition root: it loads configuration, installs
//! logging, builds the scenario and wires the chain stand-in to the engine's
//! event bus before running the scripted session.

pub mod chain;
pub mod logging;
pub mod scenario;
pub mod session;
