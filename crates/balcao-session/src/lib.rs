//! # Balcão Session Library
//!
//! In-memory counter session: the cart being rung up, the client registry
//! and the store configuration, plus the commands the front end calls on
//! every form change.
//!
//! ## Module Organization
//! ```text
//! balcao_session/
//! ├── lib.rs          ◄─── You are here (Session, tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── clients.rs  ◄─── Client registry
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart, discount and split commands
//! │   ├── client.rs   ◄─── Document check and registration
//! │   ├── product.rs  ◄─── Product fiscal commands
//! │   ├── fiscal.rs   ◄─── Document cancellation
//! │   ├── form.rs     ◄─── Input mask command
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Example
//! ```rust
//! use balcao_core::{Discount, TaxpayerKind};
//! use balcao_session::commands::{cart, client};
//! use balcao_session::Session;
//!
//! let session = Session::default();
//!
//! let check = client::check_document("11222333000181", TaxpayerKind::Organization);
//! assert!(check.valid);
//!
//! let response = cart::set_discount(&session.cart, Discount::percent(10)).unwrap();
//! assert_eq!(response.totals.total_cents, 0);
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CartState, ClientRegistry, ConfigState};

/// Everything a counter session holds.
///
/// Fields are separate state types so each command borrows only what it needs.
#[derive(Debug, Default)]
pub struct Session {
    pub cart: CartState,
    pub clients: ClientRegistry,
    pub config: ConfigState,
}

impl Session {
    pub fn new(config: ConfigState) -> Self {
        Session {
            cart: CartState::new(),
            clients: ClientRegistry::new(),
            config,
        }
    }

    /// Builds a session configured from `BALCAO_*` environment variables.
    pub fn from_env() -> Self {
        let config = ConfigState::from_env();
        info!(
            store = %config.store_name,
            cnpj_configured = config.company_cnpj.is_some(),
            "Session started"
        );
        Self::new(config)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=balcao=trace` - Show trace for balcao crates only
/// - Default: INFO, DEBUG for balcao crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,balcao=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
