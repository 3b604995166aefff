//! Tweak records and the ordered selection they are composed from.

use serde::{Deserialize, Serialize};

/// Usage metadata attached to a tweak by the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TweakMetadata {
    /// Number of times the tweak has been downloaded.
    #[serde(default)]
    pub downloads: u64,
    /// Number of users who marked the tweak as a favourite.
    #[serde(default)]
    pub favorites: u64,
    /// Number of problem reports filed against the tweak.
    #[serde(default)]
    pub reports: u64,
    /// Free-form note left by the tweak's author.
    #[serde(default)]
    pub author_comment: Option<String>,
}

/// A named remediation script snippet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tweak {
    /// Stable identifier assigned by the catalogue.
    pub id: String,
    /// Human-readable title, also used to derive per-tweak file names.
    pub title: String,
    /// Longer explanation shown in annotations.
    #[serde(default)]
    pub description: String,
    /// Raw PowerShell source.
    pub code: String,
    /// Usage counters and author note.
    #[serde(flatten)]
    pub metadata: TweakMetadata,
}

impl Tweak {
    /// Creates a tweak with empty description and metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            code: code.into(),
            metadata: TweakMetadata::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the usage metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TweakMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Insertion-ordered mapping of tweak id to tweak.
///
/// Composition output follows this order. Re-inserting an id that is already
/// present replaces the record in place and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<Tweak>", into = "Vec<Tweak>")]
pub struct Selection {
    tweaks: Vec<Tweak>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { tweaks: Vec::new() }
    }

    /// Adds `tweak`, returning the record it replaced if the id was present.
    pub fn insert(&mut self, tweak: Tweak) -> Option<Tweak> {
        match self.tweaks.iter_mut().find(|existing| existing.id == tweak.id) {
            Some(slot) => Some(std::mem::replace(slot, tweak)),
            None => {
                self.tweaks.push(tweak);
                None
            }
        }
    }

    /// Removes the tweak with `id`, preserving the order of the others.
    pub fn remove(&mut self, id: &str) -> Option<Tweak> {
        let index = self.tweaks.iter().position(|tweak| tweak.id == id)?;
        Some(self.tweaks.remove(index))
    }

    /// Looks up a tweak by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tweak> {
        self.tweaks.iter().find(|tweak| tweak.id == id)
    }

    /// Returns true when a tweak with `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the selected tweaks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tweak> {
        self.tweaks.iter()
    }

    /// Iterates over the selected ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tweaks.iter().map(|tweak| tweak.id.as_str())
    }

    /// Number of selected tweaks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweaks.len()
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweaks.is_empty()
    }
}

impl From<Vec<Tweak>> for Selection {
    fn from(tweaks: Vec<Tweak>) -> Self {
        tweaks.into_iter().collect()
    }
}

impl From<Selection> for Vec<Tweak> {
    fn from(selection: Selection) -> Self {
        selection.tweaks
    }
}

impl FromIterator<Tweak> for Selection {
    fn from_iter<I: IntoIterator<Item = Tweak>>(iter: I) -> Self {
        let mut selection = Self::new();
        for tweak in iter {
            selection.insert(tweak);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Tweak;
    type IntoIter = std::slice::Iter<'a, Tweak>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
