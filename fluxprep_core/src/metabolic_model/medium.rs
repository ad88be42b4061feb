//! This module provides the Medium struct, the set of compounds available for uptake
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single component of a growth medium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaComponent {
    /// Compound identifier, canonical after name correction
    pub id: String,
    /// Name as it appeared in the media file
    #[serde(default)]
    pub name: Option<String>,
    /// Optional uptake limit (flux or concentration) for the component
    #[serde(default)]
    pub uptake: Option<f64>,
}

impl MediaComponent {
    pub fn new<S: Into<String>>(id: S) -> Self {
        MediaComponent {
            id: id.into(),
            name: None,
            uptake: None,
        }
    }
}

/// Represents a growth medium, keyed by compound id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Medium {
    /// Optional name of the medium
    pub name: Option<String>,
    /// Components of the medium keyed by compound id
    pub components: IndexMap<String, MediaComponent>,
}

impl Medium {
    pub fn new_empty() -> Self {
        Medium::default()
    }

    /// Create a medium from compound ids, with no uptake limits
    ///
    /// # Examples
    /// ```rust
    /// use fluxprep_core::metabolic_model::medium::Medium;
    /// let medium = Medium::from_ids(["cpd00027_e", "cpd00001_e"]);
    /// assert!(medium.contains("cpd00027_e"));
    /// ```
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut medium = Medium::new_empty();
        for id in ids {
            medium.add_component(MediaComponent::new(id));
        }
        medium
    }

    /// Add a component, keeping the existing entry if the id is already present
    ///
    /// Returns true if the component was inserted
    pub fn add_component(&mut self, component: MediaComponent) -> bool {
        if self.components.contains_key(&component.id) {
            return false;
        }
        self.components.insert(component.id.clone(), component);
        true
    }

    /// Whether the compound id is part of the medium
    pub fn contains(&self, compound_id: &str) -> bool {
        self.components.contains_key(compound_id)
    }

    /// Uptake limit of a component, if one was given
    pub fn uptake_limit(&self, compound_id: &str) -> Option<f64> {
        self.components.get(compound_id).and_then(|c| c.uptake)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}
