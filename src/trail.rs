use crate::route::LocationKind;

/// One historical stop. `label` is the raw, possibly marked-up title text;
/// truncation and stripping happen at render time so tooltips keep the full
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub id: String,
    pub kind: LocationKind,
    pub label: String,
}

/// Ordered trail of visited locations, most-recently-visited first.
/// Holds at most `cap + 1` entries: `cap` prior stops plus the current one.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<Crumb>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit: drop any existing entry with the same id, insert the
    /// crumb as most recent, then discard the oldest entries beyond
    /// `cap + 1`. Calling this twice with the same crumb and cap is a no-op
    /// the second time.
    pub fn upsert(&mut self, crumb: Crumb, cap: usize) {
        self.entries.retain(|e| e.id != crumb.id);
        self.entries.insert(0, crumb);
        self.entries.truncate(cap + 1);
    }

    pub fn entries(&self) -> &[Crumb] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
