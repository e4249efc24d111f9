//! # Cipher-Kit: Classical Ciphers and Their Cryptanalysis
//!
//! `cipher-kit` implements the classical monoalphabetic and polyalphabetic ciphers over
//! the 26-letter alphabet and recovers their keys from ciphertext alone.
//!
//! ## Core Concepts
//!
//! - **`ClassicalCipher`**: encryption and decryption for `CaesarCipher`,
//!   `SubstitutionCipher` and `VigenereCipher`. Non-letters pass through untouched.
//! - **`FrequencyCracker`**: key recovery from letter frequencies against an injected
//!   `LanguageModel` (French by default).
//! - **`Kasiski`**: repeated-trigram analysis, period selection through a
//!   `PeriodStrategy`, and per-coset Caesar cracking of Vigenère ciphertext.
//!
//! Every cracker is a statistical heuristic. A wrong key is a possible outcome, not an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use cipher_kit::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let ciphertext = CaesarCipher::encode("attaquez a laube", 3);
//!     assert_eq!(ciphertext, "dwwdtxhc d odxeh");
//!
//!     let key = VigenereKey::new("clef")?;
//!     let hidden = VigenereCipher::encrypt(&key, "Rendez-vous à midi")?;
//!     assert_eq!(VigenereCipher::decrypt(&key, &hidden)?, "rendez-vous a midi");
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod asymmetric;
pub mod common;
pub mod error;
pub mod systems;

pub use error::{Error, Result};

/// The version of the `cipher-kit` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Prelude ---
// A collection of the most commonly used traits, structs, and enums.
pub mod prelude {
    pub use crate::analysis::{
        FixedPeriod, GcdOfFrequentSpacings, Kasiski, KasiskiSolution, MostCommonFactor,
        PeriodStrategy,
    };
    pub use crate::common::{
        AnalysisConfig, Alphabet, ClassicalCipher, FrequencyCracker, FrequencyRank, LanguageModel,
        TieBreak, normalize,
    };
    pub use crate::error::{Error, Result};
    pub use crate::systems::{
        CaesarCipher, CaesarKey, Direction, SubstitutionCipher, SubstitutionKey, VigenereCipher,
        VigenereKey,
    };
}
