//! Launch plans: which packages a program needs and how to start it.

mod plan;
mod vars;

pub use plan::{
    ExecuteSpec, LaunchPlan, MissingPackage, PackageRequirement, PlanResolution, Resolution,
    ResolvedLaunch, RuntimeSpec, resolve_requirements,
};
pub use vars::substitute_vars;
