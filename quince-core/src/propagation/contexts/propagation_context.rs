use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::TrailedInt;
use crate::engine::TrailedRegisters;
use crate::variables::IntegerVariable;

/// A read-only view of the engine state, provided to a propagator when it is
/// synchronised after backtracking.
///
/// Domains can be read through the implementation of [`ReadDomains`].
#[derive(Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// Provided to the propagator when it is notified of a domain event.
///
/// The difference with [`PropagationContextMut`] is that it is not possible to
/// perform a propagation in the notify callback; only the backtrackable
/// registers can be written, for incremental bookkeeping.
#[derive(Debug)]
pub struct NotificationContext<'a> {
    assignments: &'a Assignments,
    trailed_registers: &'a mut TrailedRegisters,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(
        assignments: &'a Assignments,
        trailed_registers: &'a mut TrailedRegisters,
    ) -> Self {
        NotificationContext {
            assignments,
            trailed_registers,
        }
    }

    /// Read the current value of a backtrackable register.
    pub fn value(&self, register: TrailedInt) -> i64 {
        self.trailed_registers.read(register)
    }

    /// Write a backtrackable register; the write is undone on backtracking.
    pub fn assign(&mut self, register: TrailedInt, value: i64) {
        self.trailed_registers.assign(register, value)
    }
}

/// Provides the engine state to a propagator during propagation: domains can
/// be read through [`ReadDomains`] and tightened through
/// [`Self::set_lower_bound`]/[`Self::set_upper_bound`], and the backtrackable
/// registers of the propagator can be read and written.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
    trailed_registers: &'a mut TrailedRegisters,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        assignments: &'a mut Assignments,
        trailed_registers: &'a mut TrailedRegisters,
    ) -> Self {
        PropagationContextMut {
            assignments,
            trailed_registers,
        }
    }

    /// Raise the lower bound of the variable. Fails if the domain of the
    /// variable becomes empty.
    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_lower_bound(self.assignments, bound)
    }

    /// Lower the upper bound of the variable. Fails if the domain of the
    /// variable becomes empty.
    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_upper_bound(self.assignments, bound)
    }

    /// Read the current value of a backtrackable register.
    pub fn value(&self, register: TrailedInt) -> i64 {
        self.trailed_registers.read(register)
    }

    /// Write a backtrackable register; the write is undone on backtracking.
    pub fn assign(&mut self, register: TrailedInt, value: i64) {
        self.trailed_registers.assign(register, value)
    }
}

pub(crate) mod private {
    use super::*;

    pub trait HasAssignments {
        fn assignments(&self) -> &Assignments;
    }

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for NotificationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

/// Bound reads over any context which exposes the domain store.
pub trait ReadDomains: private::HasAssignments {
    /// Returns `true` if the domain of the given variable is a single value.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }
}

impl<T: private::HasAssignments> ReadDomains for T {}
