//! # Session State Management
//!
//! State shared between commands for the lifetime of a counter session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                                │
//! │    ├── CartState       Arc<Mutex<Cart>>     one writer at a time        │
//! │    ├── ClientRegistry  RwLock<Vec<Client>>  many readers (search)       │
//! │    └── ConfigState     plain struct         read-only after startup     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod clients;
mod config;

pub use cart::{Cart, CartItem, CartState, CartTotals};
pub use clients::{Client, ClientRegistry};
pub use config::{
    ConfigState, ENV_COMPANY_CNPJ, ENV_CURRENCY_SYMBOL, ENV_STORE_NAME, MAX_CURRENCY_DECIMALS,
};
