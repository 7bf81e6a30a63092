use crate::error::SourceError;
use crate::model::{RawContact, RevealedContact};

/// External people-search service.
///
/// Calls are synchronous; the engine waits for each to finish before moving
/// on and never issues them concurrently.
pub trait ContactSource {
    /// Find people at `domain` whose titles match any of `title_filters`.
    fn search(&self, domain: &str, title_filters: &[String]) -> Result<Vec<RawContact>, SourceError>;

    /// Look up the email (and any richer name data) for one person.
    fn reveal(&self, id: &str) -> Result<RevealedContact, SourceError>;
}

impl<T: ContactSource + ?Sized> ContactSource for &T {
    fn search(&self, domain: &str, title_filters: &[String]) -> Result<Vec<RawContact>, SourceError> {
        (**self).search(domain, title_filters)
    }

    fn reveal(&self, id: &str) -> Result<RevealedContact, SourceError> {
        (**self).reveal(id)
    }
}
