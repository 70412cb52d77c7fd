//! PromptPatterns - structured fields to prompt-engineering templates
//!
//! Turns an ordered list of free-text fields into a full instruction sentence
//! following one of the named patterns: RTF, TAG, BAB, CARE, APO, RACCCA,
//! PGTC, or KEYWORDS. Rendering is deterministic and stateless; the only
//! checks are on item count.
//!
//! # Example
//!
//! ```
//! let prompt = promptpatterns::render(
//!     "rtf",
//!     &["a helpful tutor", "explain recursion", "a numbered list"],
//! )?;
//! assert!(prompt.starts_with("You are an AI assistant. a helpful tutor."));
//! # Ok::<(), promptpatterns::PatternError>(())
//! ```

pub mod cli;
pub mod config;
mod error;
mod pattern;
mod registry;

pub use error::{Arity, PatternError, Result};
pub use pattern::{MAX_KEYWORDS, Pattern, PatternInstance};
pub use registry::{PatternRegistry, global_registry, lookup, normalize, render, supported_patterns};
