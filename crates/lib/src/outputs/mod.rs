//! Output composition.
//!
//! A build writes three outputs:
//!
//! ```text
//! $lib   bare package, a copy of the source tree
//! ├── ...
//! └── package.json
//!
//! $deps  the dependency closure (always exists, possibly empty)
//!
//! $out   the composed installation
//! ├── bin
//! │   └── cli -> ../lib/cli.js
//! └── lib
//!     ├── cli.js -> $lib/cli.js          (copied under `copy`)
//!     ├── package.json -> $lib/package.json
//!     └── node_modules -> $deps
//! ```

mod bins;
mod compose;
mod types;

pub use bins::link_binaries;
pub use compose::compose_outputs;
pub use types::*;
