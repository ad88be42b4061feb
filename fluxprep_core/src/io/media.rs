//! Module for reading growth media and reconciling their names with a model's compounds
//!
//! Media files name their compounds loosely (display names, differing case), while the rest of
//! the crate compares compound ids exactly. [`correct_names`] is the only place where that gap
//! is bridged, so it should run before a medium is used to reconcile bounds.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::io::{IoError, MediumLoader};
use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::medium::{MediaComponent, Medium};

// region Reading
#[derive(Serialize, Deserialize)]
struct JsonMedium {
    name: Option<String>,
    components: Vec<MediaComponent>,
}

impl Medium {
    /// Read a tab separated media file
    ///
    /// The first non-comment line is a header naming the columns. An `id` column is required,
    /// `name` and `uptake` columns are optional. Blank lines and lines starting with `#` are
    /// skipped.
    pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Medium, IoError> {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        let data = fs::read_to_string(path).map_err(|e| IoError::UnableToRead(format!("{:?}", e)))?;
        let mut medium = Medium::from_tsv_str(&data)?;
        medium.name = name;
        Ok(medium)
    }

    /// Parse tab separated media text, see [`Medium::read_tsv`]
    pub fn from_tsv_str(data: &str) -> Result<Medium, IoError> {
        let mut rows = data
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            });
        let (header_line, header) = rows.next().ok_or(IoError::InvalidMedium {
            line: 0,
            reason: "no header row".to_string(),
        })?;
        let columns = TsvColumns::from_header(&split_fields(header), header_line)?;
        let mut medium = Medium::new_empty();
        for (line_number, line) in rows {
            let component = columns.parse_row(&split_fields(line), line_number)?;
            if !medium.add_component(component) {
                debug!("Duplicate medium entry on line {} ignored", line_number);
            }
        }
        Ok(medium)
    }

    /// Read a media file in JSON format
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Medium, IoError> {
        let data = fs::read_to_string(path).map_err(|e| IoError::UnableToRead(format!("{:?}", e)))?;
        Medium::from_json_str(&data)
    }

    /// Parse a medium from JSON text of the form `{"name": .., "components": [..]}`
    pub fn from_json_str(data: &str) -> Result<Medium, IoError> {
        let json: JsonMedium = serde_json::from_str(data)?;
        let mut medium = Medium::new_empty();
        medium.name = json.name;
        for component in json.components {
            medium.add_component(component);
        }
        Ok(medium)
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').map(str::trim).collect()
}

/// Positions of the known columns in a media file
struct TsvColumns {
    id: usize,
    name: Option<usize>,
    uptake: Option<usize>,
}

impl TsvColumns {
    fn from_header(fields: &[&str], line: usize) -> Result<Self, IoError> {
        let find = |names: &[&str]| {
            fields
                .iter()
                .position(|f| names.iter().any(|n| f.eq_ignore_ascii_case(n)))
        };
        let id = find(&["id", "compound", "compound id"][..]).ok_or(IoError::InvalidMedium {
            line,
            reason: "header has no id column".to_string(),
        })?;
        Ok(TsvColumns {
            id,
            name: find(&["name", "compound name"][..]),
            uptake: find(&["uptake", "flux", "concentration"][..]),
        })
    }

    fn parse_row(&self, fields: &[&str], line: usize) -> Result<MediaComponent, IoError> {
        let field = |i: Option<usize>| {
            i.and_then(|i| fields.get(i).copied())
                .filter(|f| !f.is_empty())
        };
        let id = field(Some(self.id)).ok_or(IoError::InvalidMedium {
            line,
            reason: "missing compound id".to_string(),
        })?;
        let uptake = match field(self.uptake) {
            Some(value) => Some(value.parse::<f64>().map_err(|e| IoError::InvalidMedium {
                line,
                reason: format!("uptake '{}' is not a number ({})", value, e),
            })?),
            None => None,
        };
        Ok(MediaComponent {
            id: id.to_string(),
            name: field(self.name).map(str::to_string),
            uptake,
        })
    }
}

/// Loads media from tab separated files
#[derive(Debug, Default, Clone, Copy)]
pub struct TsvMediumLoader;

impl MediumLoader for TsvMediumLoader {
    fn load_medium(&self, source: &str) -> Result<Medium, IoError> {
        Medium::read_tsv(source)
    }
}

/// Loads media from JSON files
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMediumLoader;

impl MediumLoader for JsonMediumLoader {
    fn load_medium(&self, source: &str) -> Result<Medium, IoError> {
        Medium::read_json(source)
    }
}
// endregion Reading

// region Name Correction
/// Remap medium entries onto the ids of the model's compounds
///
/// Each entry is tried, by its id and then by its name, against:
/// 1. compound ids, exactly
/// 2. compound ids, ignoring case
/// 3. compound names, ignoring case
/// 4. compound names reduced to lowercase alphanumerics
///
/// When a step matches several compounds, the first one in model order that isn't an
/// uptake/secretion compound is used, since media describe external compounds rather than
/// boundary placeholders. Entries that match nothing are kept as they are. Entries which
/// collapse onto the same compound are merged, keeping the first.
pub fn correct_names(medium: Medium, compounds: &IndexMap<String, Compound>) -> Medium {
    let mut corrected = Medium {
        name: medium.name,
        components: IndexMap::new(),
    };
    let mut unmatched = 0usize;
    for (_, mut component) in medium.components {
        match canonical_id(&component, compounds) {
            Some(id) => {
                if id != component.id {
                    debug!("Medium entry {} corrected to {}", component.id, id);
                    if component.name.is_none() {
                        component.name = Some(component.id.clone());
                    }
                    component.id = id.to_string();
                }
            }
            None => {
                warn!(
                    "Medium entry {} matches no compound in the model, keeping it as is",
                    component.id
                );
                unmatched += 1;
            }
        }
        corrected.add_component(component);
    }
    debug!(
        "Corrected medium names: {} entries, {} unmatched",
        corrected.len(),
        unmatched
    );
    corrected
}

/// Find the canonical compound id for a medium entry, None if it matches nothing
pub fn canonical_id<'a>(
    component: &MediaComponent,
    compounds: &'a IndexMap<String, Compound>,
) -> Option<&'a str> {
    let keys = std::iter::once(component.id.as_str()).chain(component.name.as_deref());
    for key in keys {
        if let Some((id, _)) = compounds.get_key_value(key) {
            return Some(id.as_str());
        }
        let lower = key.to_lowercase();
        let normalized = normalize(key);
        let stages: [&dyn Fn(&Compound) -> bool; 3] = [
            &|c: &Compound| c.id.to_lowercase() == lower,
            &|c: &Compound| c.display_name().to_lowercase() == lower,
            &|c: &Compound| !normalized.is_empty() && normalize(c.display_name()) == normalized,
        ];
        for matches in stages {
            if let Some(id) = preferred_match(compounds, matches) {
                return Some(id);
            }
        }
    }
    None
}

/// First matching compound that isn't on the boundary, else the first match at all
fn preferred_match<'a>(
    compounds: &'a IndexMap<String, Compound>,
    matches: &dyn Fn(&Compound) -> bool,
) -> Option<&'a str> {
    let mut fallback = None;
    for cpd in compounds.values().filter(|c| matches(c)) {
        if !cpd.uptake_secretion {
            return Some(cpd.id.as_str());
        }
        fallback.get_or_insert(cpd.id.as_str());
    }
    fallback
}

/// Lowercase alphanumeric characters of a name, everything else dropped
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
// endregion Name Correction

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::compound::CompoundBuilder;
    use std::path::PathBuf;

    fn compounds() -> IndexMap<String, Compound> {
        let mut compounds = IndexMap::new();
        for (id, name, boundary) in [
            ("cpd00027_b", "D-Glucose", true),
            ("cpd00027_e", "D-Glucose", false),
            ("cpd00007_e", "O2", false),
            ("cpd00254_e", "Mg2+", false),
        ] {
            let cpd = CompoundBuilder::default()
                .id(id)
                .name(name)
                .uptake_secretion(boundary)
                .build()
                .unwrap();
            compounds.insert(id.to_string(), cpd);
        }
        compounds
    }

    #[test]
    fn tsv_with_header_and_comments() {
        let data = "# minimal medium\nid\tname\tuptake\ncpd00027_e\tD-Glucose\t10\n\ncpd00007_e\tO2\t\n";
        let medium = Medium::from_tsv_str(data).unwrap();
        assert_eq!(medium.len(), 2);
        assert!((medium.uptake_limit("cpd00027_e").unwrap() - 10.).abs() < 1e-25);
        assert_eq!(medium.uptake_limit("cpd00007_e"), None);
        assert_eq!(
            medium.components["cpd00007_e"].name.as_deref(),
            Some("O2")
        );
    }

    #[test]
    fn tsv_errors() {
        match Medium::from_tsv_str("name\tuptake\nO2\t1\n") {
            Err(IoError::InvalidMedium { line: 1, .. }) => {}
            other => panic!("Missing id column not caught: {:?}", other),
        }
        match Medium::from_tsv_str("id\tuptake\ncpd00007_e\tlots\n") {
            Err(IoError::InvalidMedium { line: 2, .. }) => {}
            other => panic!("Bad uptake not caught: {:?}", other),
        }
        assert!(Medium::from_tsv_str("# nothing here\n").is_err());
    }

    #[test]
    fn json_medium() {
        let data = r#"{"name":"minimal","components":[{"id":"cpd00027_e","uptake":5.0},{"id":"cpd00007_e"}]}"#;
        let medium = Medium::from_json_str(data).unwrap();
        assert_eq!(medium.name.as_deref(), Some("minimal"));
        assert_eq!(medium.ids().collect::<Vec<_>>(), vec!["cpd00027_e", "cpd00007_e"]);
    }

    #[test]
    fn read_tsv_file() {
        let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("media")
            .join("glucose_minimal.tsv");
        let medium = TsvMediumLoader
            .load_medium(data_path.to_str().unwrap())
            .unwrap();
        assert_eq!(medium.name.as_deref(), Some("glucose_minimal"));
        assert_eq!(medium.ids().collect::<Vec<_>>(), vec!["D-Glucose", "o2"]);
    }

    #[test]
    fn read_json_file() {
        let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("media")
            .join("glucose_minimal.json");
        let medium = JsonMediumLoader
            .load_medium(data_path.to_str().unwrap())
            .unwrap();
        assert_eq!(medium.name.as_deref(), Some("glucose_minimal"));
        assert_eq!(medium.ids().collect::<Vec<_>>(), vec!["cpd_glc_e", "cpd_o2_e"]);
        assert!((medium.uptake_limit("cpd_glc_e").unwrap() - 10.).abs() < 1e-25);
        assert_eq!(medium.uptake_limit("cpd_o2_e"), None);
        assert_eq!(medium.components["cpd_o2_e"].name.as_deref(), Some("O2"));
    }

    #[test]
    fn correction_stages() {
        let compounds = compounds();
        let medium = Medium::from_ids(["cpd00007_e", "CPD00254_E", "d-glucose", "mg2"]);
        let corrected = correct_names(medium, &compounds);
        // The exact id, the id in another case, and the name (preferring the non boundary
        // compound) all land on model ids; "mg2" normalises onto "Mg2+" which is already
        // present and so is merged
        assert_eq!(
            corrected.ids().collect::<Vec<_>>(),
            vec!["cpd00007_e", "cpd00254_e", "cpd00027_e"]
        );
        assert_eq!(
            corrected.components["cpd00027_e"].name.as_deref(),
            Some("d-glucose")
        );
    }

    #[test]
    fn correction_uses_name_column() {
        let compounds = compounds();
        let mut medium = Medium::new_empty();
        medium.add_component(MediaComponent {
            id: "glucose_from_file".to_string(),
            name: Some("D-Glucose".to_string()),
            uptake: Some(10.),
        });
        let corrected = correct_names(medium, &compounds);
        assert!(corrected.contains("cpd00027_e"));
        assert!((corrected.uptake_limit("cpd00027_e").unwrap() - 10.).abs() < 1e-25);
    }

    #[test]
    fn unmatched_names_pass_through() {
        let compounds = compounds();
        let medium = Medium::from_ids(["Cobalamin"]);
        let corrected = correct_names(medium.clone(), &compounds);
        assert_eq!(corrected, medium);
    }

    #[test]
    fn boundary_compound_used_when_alone() {
        let mut compounds = compounds();
        compounds.shift_remove("cpd00027_e");
        assert_eq!(
            canonical_id(&MediaComponent::new("D-Glucose"), &compounds),
            Some("cpd00027_b")
        );
    }
}
