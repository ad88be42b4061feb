//! This module provides the Compound struct representing a metabolite in the model
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use derive_builder::Builder;

/// Represents a compound (metabolite)
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Compound {
    /// Used to identify the compound (must be unique)
    #[builder(setter(into))]
    pub id: String,
    /// Human readable name, used when matching medium entries
    #[builder(setter(into, strip_option), default = "None")]
    pub name: Option<String>,
    /// Whether the compound sits on the system boundary (uptake or secretion)
    #[builder(default = "false")]
    pub uptake_secretion: bool,
    /// Which compartment the compound is in
    #[builder(setter(into, strip_option), default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the compound
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical formula of the compound
    #[builder(setter(into, strip_option), default = "None")]
    pub formula: Option<String>,
}

impl Compound {
    /// Name used for medium matching, the id when no name was given
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.compartment {
            Some(compartment) => write!(f, "{}[{}]", self.display_name(), compartment),
            None => write!(f, "{}", self.display_name()),
        }
    }
}

impl Hash for Compound {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
        if let Some(ref compartment) = self.compartment {
            compartment.hash(state)
        };
    }
}
