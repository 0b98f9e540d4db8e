//! Backend E2E tests.
//!
//! These run full inventory sessions against the in-memory storage adapters,
//! so they need no external services.
//!
//! ```bash
//! cargo test -p satchel-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
