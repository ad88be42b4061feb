//! Core rust implementation of fluxprep, a crate for preparing metabolic models for flux balance
//! analysis against a growth medium.
//!
//! The usual flow is: load a [`Model`](metabolic_model::model::Model) and a
//! [`Medium`](metabolic_model::medium::Medium), correct the medium's names against the model's
//! compounds with [`correct_names`](io::media::correct_names), then call
//! [`flux_balance`](fba::flux_balance), or [`prepare_model`](prepare::prepare_model) followed by
//! [`run_fba`](fba::run_fba) to inspect the prepared model in between.

pub mod configuration;
pub mod error;
pub mod fba;
pub mod io;
pub mod metabolic_model;
pub mod optimize;
pub mod prepare;

pub use error::FbaError;
pub use fba::{flux_balance, run_fba, FbaResult};
pub use prepare::{prepare_model, PreparedModel};
