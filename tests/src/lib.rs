//! # Chain Observer Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Simulator-shaped wire messages
//! └── integration/      # Raw text in, projection out
//!     ├── scenarios.rs  # Reference sequences
//!     └── session.rs    # Epochs, malformed input, bounded history
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p observer-tests
//!
//! # By category
//! cargo test -p observer-tests integration::scenarios::
//! cargo test -p observer-tests integration::session::
//!
//! # Benchmarks
//! cargo bench -p observer-tests
//! ```

pub mod integration;
