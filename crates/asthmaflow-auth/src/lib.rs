//! Asthma Flow auth protection library — login attempt tracking and lockout.
//!
//! `asthmaflow-auth` provides the brute-force protection used by the staff
//! login flow: a per-identifier failed-attempt counter that locks an
//! identifier out after too many consecutive failures, until a block window
//! has elapsed since the most recent one. It is intentionally decoupled from
//! HTTP, sessions, and storage so that any authentication callback can drive
//! it with nothing but an identifier string.
//!
//! # Modules
//!
//! - [`guard`] — [`LoginAttemptGuard`], the failure tracker and lockout enforcer.
//! - [`config`] — [`GuardConfig`], construction-time configuration with TOML-friendly defaults.
//! - [`clock`] — [`Clock`] time source abstraction; [`SystemClock`] for production, [`ManualClock`] for tests.

pub mod clock;
pub mod config;
pub mod guard;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, GuardConfig};
pub use guard::LoginAttemptGuard;
