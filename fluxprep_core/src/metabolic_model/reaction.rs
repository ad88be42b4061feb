//! This module provides a struct for representing reactions
use crate::configuration;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    #[builder(setter(into))]
    pub id: String,
    /// Human-readable reaction name
    #[builder(setter(into, strip_option), default = "None")]
    pub name: Option<String>,
    /// Compound stoichiometry of the reaction, negative coefficients are consumed
    #[builder(default = "IndexMap::new()")]
    pub compounds: IndexMap<String, f64>,
    /// Lower flux bound
    #[builder(default = "configuration::current().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "configuration::current().upper_bound")]
    pub upper_bound: f64,
    /// Whether the reaction exchanges a compound across the system boundary
    ///
    /// ### Note
    /// Loaders leave this false, it is set during classification.
    #[builder(default = "false")]
    pub is_uptake_secretion: bool,
    /// Reaction subsystem
    #[builder(setter(into, strip_option), default = "None")]
    pub subsystem: Option<String>,
}

impl Reaction {
    /// Name used in messages, the id when no name was given
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Iterate over the ids of the compounds participating in this reaction
    pub fn compound_ids(&self) -> impl Iterator<Item = &str> {
        self.compounds.keys().map(String::as_str)
    }

    /// Whether the reaction's name contains `marker`, ignoring case
    ///
    /// Only the name is searched, an unnamed reaction never matches.
    pub fn name_matches(&self, marker: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&marker.to_lowercase()))
    }

    /// Whether the bounds allow negative flux
    pub fn is_reversible(&self) -> bool {
        self.lower_bound < 0f64 && self.upper_bound > 0f64
    }
}

impl ReactionBuilder {
    /// Add a single compound with its stoichiometric coefficient
    pub fn compound<S: Into<String>>(&mut self, id: S, coefficient: f64) -> &mut Self {
        self.compounds
            .get_or_insert_with(IndexMap::new)
            .insert(id.into(), coefficient);
        self
    }
}
