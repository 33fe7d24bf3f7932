//! Translation between the local shape and the remote wire shape.
//!
//! Every `*_from_remote` mapping is total: an absent or empty remote field
//! falls back to the locally known prior value, then to a default. Mapping
//! never fails.

mod patient;
mod result;
mod technician;

pub use patient::*;
pub use result::*;
pub use technician::*;

/// First non-empty candidate, or an empty string.
fn pick<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}
