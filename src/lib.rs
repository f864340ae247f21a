//! Tally - shared expense ledger with debt settlement
//!
//! This library provides the core functionality for the `tally` command line
//! tool. A ledger records who belongs to which group, who paid for what and
//! which money was handed over in advance; from that it computes every
//! person's net balance and a short list of payments that settles them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing setup for the binary
//! - `models`: Core data models (money, expenses, prepayments, the ledger)
//! - `storage`: JSON file storage layer
//! - `services`: Balance calculation and settlement planning
//! - `display`: Text formatting for listings and the summary report
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers for the `tally` binary
//!
//! # Example
//!
//! ```rust
//! use tally_cli::models::{Expense, Ledger};
//! use tally_cli::services::SettlementPlanner;
//!
//! let mut ledger = Ledger::new();
//! ledger.create_group("All", &["Alice".to_string(), "Bob".to_string()]).unwrap();
//! ledger.upsert_expense(Expense::new("Alice", 40.0, "All", "Dinner"), None).unwrap();
//!
//! let settlement = SettlementPlanner.settle(&ledger).unwrap();
//! assert_eq!(settlement.transactions[0].to_string(), "Bob pays Alice 20.00");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::TallyError;
