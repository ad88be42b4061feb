//! Module providing JSON IO for fluxprep Models
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration;
use crate::io::{IoError, ModelLoader};
use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::ReactionBuilder;

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    #[serde(alias = "metabolites")]
    compounds: Vec<JsonCompound>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonCompound {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    #[serde(default)]
    uptake_secretion: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    #[serde(alias = "metabolites")]
    compounds: IndexMap<String, f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    subsystem: Option<String>,
}
// endregion JSON Model

// region Conversions
impl JsonCompound {
    /// Convert into a Compound, flagging compounds in the boundary compartment when the
    /// document doesn't say otherwise
    fn into_compound(self, boundary_compartment: &str) -> Compound {
        let uptake_secretion = self.uptake_secretion.unwrap_or_else(|| {
            self.compartment.as_deref() == Some(boundary_compartment)
        });
        Compound {
            id: self.id,
            name: self.name,
            uptake_secretion,
            compartment: self.compartment,
            charge: self.charge.unwrap_or_default(),
            formula: self.formula,
        }
    }
}

impl From<&Compound> for JsonCompound {
    fn from(c: &Compound) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            compartment: c.compartment.clone(),
            charge: Some(c.charge),
            formula: c.formula.clone(),
            uptake_secretion: Some(c.uptake_secretion),
        }
    }
}

impl Model {
    /// Read a model from a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, IoError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(IoError::UnableToRead(format!("{:?}", err))),
        };
        Model::from_json_str(&model_str)
    }

    /// Parse a model from JSON text
    pub fn from_json_str(data: &str) -> Result<Model, IoError> {
        let json_model = match serde_json::from_str::<JsonModel>(data) {
            Ok(model) => model,
            Err(err) => return Err(IoError::Parse(format!("{}", err))),
        };
        Model::from_json(json_model)
    }

    /// Write the model to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), IoError> {
        let model_string = self.to_json_string()?;
        fs::write(path, model_string).map_err(|e| IoError::UnableToRead(e.to_string()))
    }

    /// Serialize the model to JSON text
    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, IoError> {
        let config = configuration::current();
        let mut model = Model::new_empty();
        model.id = json_model.id;
        for cpd in json_model.compounds {
            model.add_compound(cpd.into_compound(&config.boundary_compartment));
        }
        for rxn in json_model.reactions {
            let mut builder = ReactionBuilder::default();
            builder
                .id(rxn.id)
                .compounds(rxn.compounds)
                .lower_bound(rxn.lower_bound.unwrap_or(config.lower_bound))
                .upper_bound(rxn.upper_bound.unwrap_or(config.upper_bound));
            if let Some(name) = rxn.name {
                builder.name(name);
            }
            if let Some(subsystem) = rxn.subsystem {
                builder.subsystem(subsystem);
            }
            model.add_reaction(builder.build()?);
        }
        Ok(model)
    }

    fn to_json(&self) -> JsonModel {
        let compounds = self.compounds.values().map(JsonCompound::from).collect();
        let reactions = self
            .reactions
            .values()
            .map(|r| JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                compounds: r.compounds.clone(),
                lower_bound: Some(r.lower_bound),
                upper_bound: Some(r.upper_bound),
                subsystem: r.subsystem.clone(),
            })
            .collect();
        JsonModel {
            compounds,
            reactions,
            id: self.id.clone(),
        }
    }
}
// endregion Conversions

/// Loads models from JSON files
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn load(&self, source: &str) -> Result<Model, IoError> {
        Model::read_json(source)
    }
}
