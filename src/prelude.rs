//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use blindar::prelude::*;
//! ```

pub use crate::ecc::EccCheck;
pub use crate::error::{BlindarError, Result};
pub use crate::sparse::{CooEntry, CooMatrix, CsrEntry, CsrMatrix};
pub use crate::spmv::{CorrectionEvent, SpmvReport};
