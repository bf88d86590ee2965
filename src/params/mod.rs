//! Simulation input parameters and their share-link serialization

mod data;
pub mod query;

pub use data::{
    DeploymentPacing, FacilityConfig, FeeBasis, FundParameters, RealizationPacing,
    RepaymentPolicy,
};
