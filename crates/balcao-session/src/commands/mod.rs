//! # Session Commands Module
//!
//! All commands exposed to the front end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation, discount, payment split
//! ├── client.rs   ◄─── CPF/CNPJ field checks, client registration
//! ├── product.rs  ◄─── Product fiscal checks, NCM lookup
//! ├── fiscal.rs   ◄─── Fiscal document cancellation
//! ├── form.rs     ◄─── Input masks (CEP, NCM, CEST, money)
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs cart
//! fn get_cart(cart: &CartState)
//!
//! // Only needs the registry
//! fn register_client(registry: &ClientRegistry, profile: ClientProfile)
//!
//! // Stateless
//! fn check_document(input: &str, kind: TaxpayerKind)
//! ```
//!
//! Commands log their entry at `debug` (`trace` for per-keystroke masks)
//! and state changes at `info`;
//! failures come back as [`ApiError`](crate::error::ApiError).

pub mod cart;
pub mod client;
pub mod config;
pub mod fiscal;
pub mod form;
pub mod product;
