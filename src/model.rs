//! Data model for the travel diary
//!
//! A [`Diary`] is the full ordered collection of [`Trip`]s for a session.
//! Each trip owns an ordered sequence of [`Photo`] entries; insertion order
//! is display order. The diary is the unit of persistence: it is always
//! loaded and saved as a whole, never incrementally.

use chrono::NaiveDateTime;

/// A named travel record owning an ordered collection of photo entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Trip name (identity, non-empty)
    pub name: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Where the trip took place, may be empty
    pub location: String,
    /// Photos in insertion order
    pub photos: Vec<Photo>,
}

impl Trip {
    /// Create a trip with no photos
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: location.into(),
            photos: Vec::new(),
        }
    }
}

/// A single captioned, timestamped image reference belonging to exactly one trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Path to the image file
    pub file_path: String,
    /// Display name
    pub name: String,
    /// Caption, may be empty
    pub caption: String,
    /// Where the photo was taken, may be empty
    pub location: String,
    /// When the photo was taken; `None` means unknown/not recorded
    pub taken_at: Option<NaiveDateTime>,
}

/// The full in-memory ordered sequence of all trips for the session
///
/// Uniqueness of trip names is not enforced; [`Diary::find_by_name`]
/// returns the first match in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diary {
    trips: Vec<Trip>,
}

impl Diary {
    /// Create an empty diary
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trips in the diary
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Whether the diary holds no trips
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Append a trip, preserving insertion order
    pub fn add_trip(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    /// Get a trip by zero-based index
    pub fn get(&self, index: usize) -> Option<&Trip> {
        self.trips.get(index)
    }

    /// Get a mutable trip by zero-based index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Trip> {
        self.trips.get_mut(index)
    }

    /// Remove and return the trip at `index`, shifting later trips down
    ///
    /// Returns `None` if the index is out of range.
    pub fn remove_trip(&mut self, index: usize) -> Option<Trip> {
        if index < self.trips.len() {
            Some(self.trips.remove(index))
        } else {
            None
        }
    }

    /// Find the first trip with the given name
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.trips.iter().position(|t| t.name == name)
    }

    /// Iterate over trips in order
    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }
}
