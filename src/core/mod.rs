//! Reconciliation core: key derivation, matching, annotation, session state

pub mod annotator;
pub mod matcher;
pub mod session;

pub use annotator::annotate;
pub use matcher::{derive_key, match_datasets};
pub use session::ReconSession;
