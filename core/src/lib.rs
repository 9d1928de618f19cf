pub mod compose;
pub mod config;
pub mod error;
pub mod location;
pub mod project;
pub mod remote;
pub mod transform;

pub use compose::{compose, load_runtime_library, Bundle, Composition};
pub use config::StitchConfig;
pub use error::{Level, StitchErrorExt, StitchResult};
pub use location::{Location, Span};
pub use project::{GameEntry, GameList, SourceProject};
pub use remote::{fetch_all, HttpProjectSource, HttpPublisher, LocalProjectSource, ProjectSource, Publisher};
pub use transform::{assemble_module, AssembledModule};

pub fn generate_error_report(error: &dyn StitchErrorExt) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("STITCH | {} | {} | {}", level, location, message)
}
