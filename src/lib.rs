//! Enumerate the source files a TypeScript project declares in its
//! tsconfig.json through the `files`, `include` and `exclude` properties.
//! The return value is a list of paths relative to the directory containing
//! the tsconfig.json, in the order a sorted depth-first walk visits them.
//!
//! Like the TypeScript compiler, this enumeration:
//!
//! - includes every `.ts`, `.tsx` and `.d.ts` file when a config names
//!   neither `files` nor `include`
//! - adds `.js` and `.jsx` files when `compilerOptions.allowJs` is set
//! - treats each `files` entry as a literal path, never as a glob
//! - lets `exclude` win over `include`
//!
//! Unlike the TypeScript compiler, no source-code analysis is performed, so
//! files reachable only through `import` statements are not listed. From the
//! [tsconfig exclude] documentation:
//!
//! > Important: `exclude` *only* changes which files are included as a result
//! > of the `include` setting.
//!
//! Here `exclude` also filters `files` entries. `extends` chains are not
//! followed.
//!
//! Both ways of resolving, locating the nearest tsconfig.json or taking a
//! [`TsConfig`] directly, come in a blocking form and an `async` form built
//! on `tokio::fs`. The `async` forms require a tokio runtime.
//!
//! [tsconfig exclude]: https://www.typescriptlang.org/tsconfig#exclude

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;
mod find_up;
pub mod io;
pub mod matcher;
pub mod path;
pub mod patterns;
mod resolve;
pub mod walk;

pub use config::{CompilerOptions, TsConfig, TSCONFIG_FILENAME};
pub use error::Error;
pub use patterns::{extensions, PatternSet};
pub use resolve::{
    files_by_project, files_from_tsconfig, files_from_tsconfig_json,
    files_from_tsconfig_json_sync, files_from_tsconfig_sync,
};
