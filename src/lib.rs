//! PromptVault: a vault for AI prompt templates.
//!
//! Prompts carry `{{variable}}` placeholders, belong to exactly one
//! owner, and can be tagged, searched and shared read-only via a public
//! flag. The crate exposes the pure template engine, the
//! access-controlled services, and an actix-web JSON RPC surface over
//! a SQLite store.
//!
//! ## Architecture
//!
//! - **domain**: entities, validated inputs, error taxonomy
//! - **application**: request context + gateway services + template engine
//! - **infrastructure**: config, SQLite pool/repository, session lookup
//! - **interfaces**: the HTTP route table and handlers

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
