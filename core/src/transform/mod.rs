//! Per-program source transforms.
//!
//! Each pass is a pure function over one file's text; `assemble` strings
//! them together into a program's wrapper module.

pub mod assemble;
pub mod err;
pub mod hoist;
pub mod kinds;
pub mod lower;
pub mod rules;
pub mod scanner;
pub mod tiles;

pub use assemble::{assemble_module, AssembledModule, ModuleStats};
pub use hoist::{hoist_declarations, DeclaredType, LiteralType};
pub use kinds::{extract_kinds, KindNames};
pub use lower::lower_functions;
pub use tiles::{rename_tiles, TileRecord};
