//! Configuration section definitions.
//!
//! Each module corresponds to a section in `redirect.toml`:
//!
//! | Module   | TOML Section         | Purpose                           |
//! |----------|----------------------|-----------------------------------|
//! | `target` | `[target]`           | New site host and path prefixes   |
//! | `table`  | `[docs]`, `[blog]`   | Exclusions and override maps      |
//! | `serve`  | `[serve]`            | Redirect server                   |

mod serve;
mod table;
mod target;

pub use serve::ServeConfig;
pub use table::{BlogConfig, DocsConfig, table_layer, validate_entries};
pub use target::{TargetConfig, validate_target};
