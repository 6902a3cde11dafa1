//! Legacy URL redirection.
//!
//! # Module Structure
//!
//! - `table` - Target site constants, exclusion set, override maps
//! - `resolve` - Path classification (`Resolver`)
//! - `navigate` - Side-effect adapter (`Navigator`)
//! - `preset` - Embedded table versions
//!
//! # Usage
//!
//! ```ignore
//! let table = Preset::Reasonml.table()?;
//! let resolver = Resolver::new(&table);
//! assert_eq!(
//!     resolver.destination("/docs/en/stdlib-overview").as_deref(),
//!     Some("https://reasonml.org/apis/javascript/latest"),
//! );
//! ```

mod navigate;
mod preset;
mod resolve;
mod table;

pub use navigate::{Navigator, follow};
pub use preset::Preset;
pub use resolve::{Destination, Resolution, Resolver};
pub use table::{MissingSegment, RedirectTable, Target};

#[cfg(test)]
pub use navigate::Recorder;
#[cfg(test)]
pub use resolve::StayReason;
