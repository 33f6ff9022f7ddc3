use std::collections::HashSet;

use boundary_types::AppId;

/// The set of apps the user has bounded.
///
/// Only ever replaced wholesale; there is no partial merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundarySet {
    apps: HashSet<AppId>,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, app: &AppId) -> bool {
        self.apps.contains(app)
    }

    /// Swap in a new set, returning the number of distinct apps now bounded.
    pub fn replace<I>(&mut self, apps: I) -> usize
    where
        I: IntoIterator<Item = AppId>,
    {
        self.apps = apps.into_iter().collect();
        self.apps.len()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Sorted copy, for display and persistence.
    pub fn sorted(&self) -> Vec<AppId> {
        let mut apps: Vec<AppId> = self.apps.iter().cloned().collect();
        apps.sort();
        apps
    }
}

impl FromIterator<AppId> for BoundarySet {
    fn from_iter<T: IntoIterator<Item = AppId>>(iter: T) -> Self {
        Self {
            apps: iter.into_iter().collect(),
        }
    }
}
