//! Preparation and growth of a genome scale sized model: 1574 reactions over 1475 compounds,
//! 174 of them boundary reactions and one biomass reaction.
use fluxprep_core::configuration::Configuration;
use fluxprep_core::fba::run_fba_with;
use fluxprep_core::metabolic_model::compound::CompoundBuilder;
use fluxprep_core::metabolic_model::medium::Medium;
use fluxprep_core::metabolic_model::model::Model;
use fluxprep_core::metabolic_model::reaction::ReactionBuilder;
use fluxprep_core::optimize::solvers::clarabel::ClarabelSolver;
use fluxprep_core::optimize::stoichiometry::StoichiometricMatrix;
use fluxprep_core::prepare::prepare_model_with;

const INTERNAL_COMPOUNDS: usize = 1301;
const BOUNDARY_COMPOUNDS: usize = 174;
const RUNNABLE_REACTIONS: usize = 1399;

/// Internal compounds form a ring of irreversible conversions, each boundary reaction exchanges
/// one internal compound, and biomass drains the last compound of the ring. Only the first
/// boundary reaction allows uptake of more than 10 units.
fn genome_scale_model() -> Model {
    let mut model = Model::new_empty();
    model.id = Some("synthetic_genome_scale".to_string());
    for i in 0..INTERNAL_COMPOUNDS {
        model.add_compound(
            CompoundBuilder::default()
                .id(format!("cpd{:05}_c", i))
                .name(format!("Compound {}", i))
                .compartment("c")
                .build()
                .unwrap(),
        );
    }
    for i in 0..BOUNDARY_COMPOUNDS {
        model.add_compound(
            CompoundBuilder::default()
                .id(format!("cpd{:05}_b", i))
                .compartment("b")
                .uptake_secretion(true)
                .build()
                .unwrap(),
        );
    }
    for k in 0..RUNNABLE_REACTIONS {
        let from = k % INTERNAL_COMPOUNDS;
        let to = (from + 1) % INTERNAL_COMPOUNDS;
        model.add_reaction(
            ReactionBuilder::default()
                .id(format!("rxn{:05}", k))
                .name(format!("Conversion {}", k))
                .compound(format!("cpd{:05}_c", from), -1.)
                .compound(format!("cpd{:05}_c", to), 1.)
                .lower_bound(0.)
                .upper_bound(1000.)
                .build()
                .unwrap(),
        );
    }
    for i in 0..BOUNDARY_COMPOUNDS {
        model.add_reaction(
            ReactionBuilder::default()
                .id(format!("EX_cpd{:05}", i))
                .name(format!("Exchange of compound {}", i))
                .compound(format!("cpd{:05}_c", i), -1.)
                .compound(format!("cpd{:05}_b", i), 1.)
                .lower_bound(if i == 0 { -10. } else { -1000. })
                .upper_bound(1000.)
                .build()
                .unwrap(),
        );
    }
    model.add_reaction(
        ReactionBuilder::default()
            .id("bio1")
            .name("synthetic auto biomass_equation")
            .compound(format!("cpd{:05}_c", INTERNAL_COMPOUNDS - 1), -1.)
            .lower_bound(0.)
            .upper_bound(1000.)
            .build()
            .unwrap(),
    );
    model
}

#[test]
fn counts_and_growth() {
    let mut model = genome_scale_model();
    assert_eq!(model.reactions.len(), 1574);
    assert_eq!(model.compounds.len(), 1475);

    let medium = Medium::from_ids(["cpd00000_c"]);
    let config = Configuration::default();
    let prepared = prepare_model_with(&mut model, &medium, &config).unwrap();
    let classes = &prepared.classification;
    assert_eq!(classes.biomass.as_deref(), Some("bio1"));
    assert_eq!(classes.boundary.len(), 174);
    assert_eq!(classes.runnable.len(), 1399);
    assert_eq!(prepared.compounds.len(), 1301);
    assert_eq!(prepared.runnable_dimensions(), (1399, 1301));
    assert_eq!(prepared.clamped, 173);

    let matrix = StoichiometricMatrix::build(&model, &prepared);
    assert_eq!(matrix.shape(), (1301, 1574));
    assert_eq!(matrix.runnable_columns, 1399);

    let result = run_fba_with(&model, &prepared, &ClarabelSolver::default(), &config).unwrap();
    assert!(result.growth);
    assert!(result.objective_value > 0.);
    assert!((result.objective_value - 10.).abs() < 1e-3);
}

#[test]
fn partition_is_disjoint_and_complete() {
    let mut model = genome_scale_model();
    let prepared =
        prepare_model_with(&mut model, &Medium::new_empty(), &Configuration::default()).unwrap();
    let classes = &prepared.classification;
    let biomass = classes.biomass.as_deref().unwrap();
    for id in model.reactions.keys() {
        let memberships = [
            classes.boundary.contains(id),
            classes.runnable.contains(id),
            id == biomass,
        ]
        .iter()
        .filter(|m| **m)
        .count();
        assert_eq!(memberships, 1, "reaction {} is in {} groups", id, memberships);
    }
    assert_eq!(classes.len(), model.reactions.len());
    for (id, rxn) in &model.reactions {
        assert_eq!(rxn.is_uptake_secretion, classes.boundary.contains(id));
    }
}

#[test]
fn nothing_supplied_means_no_growth() {
    let mut model = genome_scale_model();
    let config = Configuration::default();
    let prepared = prepare_model_with(&mut model, &Medium::new_empty(), &config).unwrap();
    assert_eq!(prepared.clamped, 174);
    for rxn in prepared.classification.boundary_reactions(&model) {
        assert_eq!(rxn.lower_bound, 0.0);
        assert!((rxn.upper_bound - 1000.).abs() < 1e-25);
    }
    let result = run_fba_with(&model, &prepared, &ClarabelSolver::default(), &config).unwrap();
    assert!(!result.growth);
}
