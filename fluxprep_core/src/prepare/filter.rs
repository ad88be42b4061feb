//! Drop boundary-only compounds from the set the stoichiometric matrix is built over
use indexmap::IndexMap;
use log::debug;

use crate::metabolic_model::compound::Compound;

/// Keep only the compounds whose uptake/secretion flag is false
///
/// The result is keyed exactly like the input, and the kept entries are unchanged copies.
pub fn filter_compounds(compounds: &IndexMap<String, Compound>) -> IndexMap<String, Compound> {
    let filtered: IndexMap<String, Compound> = compounds
        .iter()
        .filter(|(_, cpd)| !cpd.uptake_secretion)
        .map(|(id, cpd)| (id.clone(), cpd.clone()))
        .collect();
    debug!(
        "Filtered compounds: kept {} of {}",
        filtered.len(),
        compounds.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::compound::CompoundBuilder;

    fn compounds(flags: &[(&str, bool)]) -> IndexMap<String, Compound> {
        flags
            .iter()
            .map(|(id, flag)| {
                let cpd = CompoundBuilder::default()
                    .id(*id)
                    .uptake_secretion(*flag)
                    .build()
                    .unwrap();
                (id.to_string(), cpd)
            })
            .collect()
    }

    #[test]
    fn key_kept_iff_not_boundary() {
        let all = compounds(&[("a_b", true), ("a_e", false), ("b_c", false), ("b_b", true)]);
        let filtered = filter_compounds(&all);
        for (id, cpd) in &all {
            assert_eq!(filtered.contains_key(id), !cpd.uptake_secretion);
        }
        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["a_e", "b_c"]);
        assert_eq!(filtered["a_e"], all["a_e"]);
    }

    #[test]
    fn nothing_on_boundary() {
        let all = compounds(&[("a_c", false), ("b_c", false)]);
        assert_eq!(filter_compounds(&all), all);
    }
}
