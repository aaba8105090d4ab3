//! # Assets Manager Client
//!
//! Talks to the entry store and turns a user's raw particulars into
//! dashboards, statistics and period comparisons.
//!
//! ```text
//! store (api::ApiClient) → aggregation / periods / title_table → presentation → views
//! ```
//!
//! The signed-in [`session::Session`] is passed explicitly to every store
//! call; nothing is cached globally.

pub mod aggregation;
pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod periods;
pub mod presentation;
pub mod render;
pub mod session;
pub mod store;
pub mod title_table;
pub mod views;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use session::Session;
pub use store::{AccountStore, EntryStore};
