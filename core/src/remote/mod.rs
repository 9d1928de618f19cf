//! file: core/src/remote/mod.rs
//! description: collaborators that talk to the outside world.
//!
//! Retrieval (`ProjectSource`) and publication (`Publisher`) are async
//! traits so a run can gather every project concurrently and tests can
//! swap in in-memory implementations.

pub mod err;
pub mod http;
pub mod local;
pub mod publish;
pub mod source;

pub use err::{PublicationError, RetrievalError};
pub use http::HttpProjectSource;
pub use local::LocalProjectSource;
pub use publish::{HttpPublisher, Publisher, ShareRequest};
pub use source::{fetch_all, ProjectSource};

use futures::channel::oneshot;

/// Run a blocking request on its own thread and await its result.
pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        // receiver only goes away when the run is already failing
        let _ = tx.send(job());
    });
    rx.await.map_err(|_| "request worker exited without a result".to_string())?
}
