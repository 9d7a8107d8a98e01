//! Per-notification ranking metadata.

use crate::error::Result;
use crate::parcel::{Parcel, Parcelable};

/// Ranking metadata for one notification key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSorting {
    pub key: String,
    pub ranking: i32,
    pub importance: i32,
    pub is_display_badge: bool,
}

impl Parcelable for NotificationSorting {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_string(&self.key)?;
        parcel.write_i32(self.ranking)?;
        parcel.write_i32(self.importance)?;
        parcel.write_bool(self.is_display_badge)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            key: parcel.read_string()?,
            ranking: parcel.read_i32()?,
            importance: parcel.read_i32()?,
            is_display_badge: parcel.read_bool()?,
        })
    }
}

/// The full set of ranking entries, rebuilt and pushed wholesale on every
/// ranking change. There is no incremental update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSortingMap {
    sortings: Vec<NotificationSorting>,
}

impl NotificationSortingMap {
    pub fn new(sortings: Vec<NotificationSorting>) -> Self {
        Self { sortings }
    }

    /// All entries in ranking order as pushed by the service.
    pub fn sortings(&self) -> &[NotificationSorting] {
        &self.sortings
    }

    /// Look up the entry for a notification key.
    pub fn sorting_for(&self, key: &str) -> Option<&NotificationSorting> {
        self.sortings.iter().find(|s| s.key == key)
    }

    pub fn len(&self) -> usize {
        self.sortings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sortings.is_empty()
    }
}

impl Parcelable for NotificationSortingMap {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_parcelable_vec(&self.sortings)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            sortings: parcel.read_parcelable_vec()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorting_lookup_by_key() {
        let map = NotificationSortingMap::new(vec![
            NotificationSorting {
                key: "a".to_string(),
                ranking: 0,
                importance: 3,
                is_display_badge: true,
            },
            NotificationSorting {
                key: "b".to_string(),
                ranking: 1,
                importance: 2,
                is_display_badge: false,
            },
        ]);
        assert_eq!(map.sorting_for("b").map(|s| s.ranking), Some(1));
        assert!(map.sorting_for("c").is_none());
    }
}
