//! Lazy match sequences

use accord_filter::Filter;
use accord_model::Capability;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Capabilities satisfying one requirement, in insertion order.
///
/// Built over a snapshot of candidates taken when the query ran; the filter
/// is evaluated lazily as the iterator advances. Later index mutations do
/// not affect an existing `Matches`. Cloning keeps the current position;
/// [`Matches::restart`] rewinds over the same snapshot.
#[derive(Clone)]
pub struct Matches {
    candidates: Arc<[Arc<Capability>]>,
    position: usize,
    filter: Arc<Filter>,
    obey_mandatory: bool,
}

impl Matches {
    pub(crate) fn new(
        candidates: Vec<Arc<Capability>>,
        filter: Arc<Filter>,
        obey_mandatory: bool,
    ) -> Self {
        Self {
            candidates: candidates.into(),
            position: 0,
            filter,
            obey_mandatory,
        }
    }

    /// Candidates not yet evaluated. An upper bound on what is left to yield.
    pub fn remaining_candidates(&self) -> usize {
        self.candidates.len() - self.position
    }

    /// Fresh iterator over the same snapshot.
    pub fn restart(&self) -> Self {
        Self {
            position: 0,
            ..self.clone()
        }
    }

    fn accepts(&self, capability: &Capability) -> bool {
        self.filter.matches(capability.attributes())
            && (!self.obey_mandatory || capability.mandatory_satisfied_by(&self.filter))
    }
}

impl Iterator for Matches {
    type Item = Arc<Capability>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidate) = self.candidates.get(self.position) {
            self.position += 1;
            if self.accepts(candidate) {
                return Some(Arc::clone(candidate));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_candidates()))
    }
}

impl FusedIterator for Matches {}

impl fmt::Debug for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("filter", &self.filter.to_string())
            .field("position", &self.position)
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
