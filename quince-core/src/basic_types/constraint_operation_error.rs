use thiserror::Error;

/// Errors related to installing constraints into the engine.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("adding the constraint failed because it is infeasible at the root")]
    InfeasibleConstraint,
    #[error("adding the constraint failed because the engine is in an infeasible state")]
    InfeasibleState,
}
