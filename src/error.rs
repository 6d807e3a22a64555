use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Failure to get a ROM image into memory. Fatal to startup; the machine's
/// memory is left untouched.
#[derive(Debug, Error)]
pub enum RomLoadError {
    #[error("ROM image is {size} bytes but at most {} fit above 0x200", MAX_ROM_SIZE)]
    TooLarge { size: usize },

    #[error("unable to read ROM image")]
    Io(#[from] std::io::Error),
}
