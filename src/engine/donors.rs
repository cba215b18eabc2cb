use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DonorId {
    pub name: String,
    pub zip: String,
}

impl DonorId {
    pub fn new(name: impl Into<String>, zip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zip: zip.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First contribution seen from this donor.
    New,
    /// Earlier than anything seen so far; the donor's first year moves back.
    Earlier,
    SameYear,
    /// Strictly later than the donor's earliest year.
    Repeat,
}

/// Earliest contribution year per donor. Entries are never removed.
#[derive(Debug, Default)]
pub struct DonorHistory {
    earliest_year: HashMap<DonorId, u16>,
}

impl DonorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, donor: DonorId, year: u16) -> Classification {
        match self.earliest_year.entry(donor) {
            Entry::Vacant(entry) => {
                entry.insert(year);
                Classification::New
            }
            Entry::Occupied(mut entry) => {
                let earliest = entry.get_mut();
                match (*earliest).cmp(&year) {
                    Ordering::Greater => {
                        *earliest = year;
                        Classification::Earlier
                    }
                    Ordering::Less => Classification::Repeat,
                    Ordering::Equal => Classification::SameYear,
                }
            }
        }
    }

    pub fn earliest_year(&self, donor: &DonorId) -> Option<u16> {
        self.earliest_year.get(donor).copied()
    }

    pub fn len(&self) -> usize {
        self.earliest_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.earliest_year.is_empty()
    }
}
