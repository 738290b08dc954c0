//! Rule system — one rule pack per audited domain.
//!
//! Each rule implements the `Rule` trait and is registered in an explicit
//! ordered list built by `RuleRegistry::for_domain`. There is no dynamic
//! discovery: registration order is part of the output contract.

pub mod kubernetes;
pub mod registry;
pub mod terraform;
pub mod token;
pub mod traits;

pub use registry::RuleRegistry;
pub use traits::{Rule, RuleContext};
