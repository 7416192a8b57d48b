//! wordforge - exhaustive fixed-length wordlist generation
//!
//! Builds an alphabet from character categories, enumerates every word of a
//! given length in odometer order (optionally shaping each position with a
//! `L`/`U`/`D`/`S` format mask) and streams the result one word per line.

pub mod cli;
pub mod error;
pub mod types;
pub mod wordlist;

// Re-export commonly used types
pub use error::{WordForgeError, Result};
pub use types::{GenerationConfig, GenerationReport};
pub use wordlist::{
    generate, write_sharded, write_to_path, write_words, Alphabet, AlphabetOptions, Directive,
    FormatMask, WordGenerator, WriteStats,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
