use super::LocalId;
use super::PropagatorId;

/// A handle to a variable registered to a propagator: the propagator together
/// with the [`LocalId`] the variable has within it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(crate) struct PropagatorVarId {
    pub(crate) propagator: PropagatorId,
    pub(crate) variable: LocalId,
}
