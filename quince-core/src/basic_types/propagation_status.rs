use crate::engine::EmptyDomain;

/// The result of invoking a propagator. Propagation can either succeed or
/// empty the domain of one of the involved variables, in which case the
/// current state is unsatisfiable and the enclosing search should abandon the
/// branch.
pub type PropagationStatus = Result<(), EmptyDomain>;
