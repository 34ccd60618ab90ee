//! Statutory rule configuration for the payroll engine.
//!
//! This module provides the rule set types, the named India default, YAML
//! loading of per-jurisdiction rule sets, and the well-formedness check every
//! rule set must pass before a calculator is built from it.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::{validate_rule_set, ConfigLoader};
//!
//! let loader = ConfigLoader::load("./config/india").unwrap();
//! validate_rule_set(loader.rules_for("MH")).unwrap();
//! ```

mod defaults;
mod loader;
mod types;
mod validation;

pub use defaults::DEFAULT_JURISDICTION;
pub use loader::ConfigLoader;
pub use types::{
    GratuityRules, ProfessionalTaxRules, ProfessionalTaxSlab, ProvidentFundRules,
    StateInsuranceRules, StatutoryRuleSet, WithholdingTaxRules, WithholdingTaxSlab,
};
pub use validation::validate_rule_set;
