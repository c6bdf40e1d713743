use crate::propagation::DomainEvents;
use crate::propagation::EmptyDomain;
use crate::propagation::LocalId;
use crate::propagation::Priority;
use crate::propagation::PropagationContextMut;
use crate::propagation::PropagationStatus;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::propagation::TrailedInt;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`SumPropagator`].
#[derive(Clone, Debug)]
pub struct SumPropagatorArgs<Var> {
    pub terms: Box<[Var]>,
    pub sum: Var,
    pub offset: i32,
}

impl<Var> PropagatorConstructor for SumPropagatorArgs<Var>
where
    Var: IntegerVariable + 'static,
{
    type PropagatorImpl = SumPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let SumPropagatorArgs { terms, sum, offset } = self;

        for (index, term) in terms.iter().enumerate() {
            context.register(term.clone(), DomainEvents::BOUNDS, LocalId::from(index as u32));
        }
        context.register(
            sum.clone(),
            DomainEvents::BOUNDS,
            LocalId::from(terms.len() as u32),
        );

        let num_fixed = context.new_trailed_int(0);
        let fixed_sum = context.new_trailed_int(offset as i64);

        SumPropagator {
            terms,
            sum,
            num_fixed,
            fixed_sum,
        }
    }
}

/// Bounds-consistent propagator for the constraint `\sum terms_i + offset =
/// sum`.
///
/// Terms which have become fixed are swapped into a prefix of `terms` and
/// their values are folded into an accumulator, so a propagation pass only
/// scans the suffix of terms whose bounds can still change. The length of the
/// fixed prefix and the accumulator are backtrackable registers: the trail
/// restores both together with the variable domains, so the partition is
/// always consistent with the current search state.
#[derive(Clone, Debug)]
pub struct SumPropagator<Var> {
    terms: Box<[Var]>,
    sum: Var,

    /// The number of terms in the fixed prefix of `terms`. Incremental state.
    num_fixed: TrailedInt,
    /// `offset` plus the values of the terms in the fixed prefix. Incremental
    /// state.
    fixed_sum: TrailedInt,
}

impl<Var: 'static> Propagator for SumPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "Sum"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let mut num_fixed = context.value(self.num_fixed) as usize;
        let mut fixed_sum = context.value(self.fixed_sum);

        // Repeat until the propagator reaches its fixpoint.
        let mut tightened = true;
        while tightened {
            tightened = false;

            let mut sum_terms_min = fixed_sum;
            let mut sum_terms_max = fixed_sum;
            let mut max_diff = 0_i64;

            // One scan over the pending suffix: newly fixed terms are folded
            // into the accumulator and swapped into the fixed prefix, the
            // others contribute their bounds to the running totals.
            let mut index = num_fixed;
            while index < self.terms.len() {
                let term = &self.terms[index];
                let lower_bound = context.lower_bound(term) as i64;
                let upper_bound = context.upper_bound(term) as i64;

                sum_terms_min += lower_bound;
                sum_terms_max += upper_bound;

                let diff = upper_bound - lower_bound;
                if diff == 0 {
                    fixed_sum += lower_bound;
                    self.terms.swap(index, num_fixed);
                    num_fixed += 1;
                } else {
                    max_diff = max_diff.max(diff);
                }

                index += 1;
            }

            // The sum variable must lie within the range spanned by the term
            // bounds. A required lower bound above `i32::MAX` (or upper bound
            // below `i32::MIN`) cannot be satisfied by any value; a permissive
            // bound outside the representable range is a no-op.
            match i32::try_from(sum_terms_min) {
                Ok(bound) => context.set_lower_bound(&self.sum, bound)?,
                Err(_) if sum_terms_min > 0 => return Err(EmptyDomain),
                Err(_) => {}
            }
            match i32::try_from(sum_terms_max) {
                Ok(bound) => context.set_upper_bound(&self.sum, bound)?,
                Err(_) if sum_terms_max < 0 => return Err(EmptyDomain),
                Err(_) => {}
            }

            // The domain of the sum variable can be narrower than
            // [sum_terms_min, sum_terms_max] because of other constraints on
            // it.
            let sum_min = context.lower_bound(&self.sum) as i64;
            let sum_max = context.upper_bound(&self.sum) as i64;

            // The `max_diff` comparisons are necessary conditions for the
            // loops below to tighten anything; they skip the O(n) scans when
            // no single pending term has enough slack to matter.
            if sum_terms_max - max_diff < sum_min {
                for term in self.terms[num_fixed..].iter() {
                    let new_min = sum_min - (sum_terms_max - context.upper_bound(term) as i64);
                    if new_min > context.lower_bound(term) as i64 {
                        let new_min = match i32::try_from(new_min) {
                            Ok(bound) => bound,
                            Err(_) => return Err(EmptyDomain),
                        };
                        context.set_lower_bound(term, new_min)?;
                        tightened = true;
                    }
                }
            }

            if sum_terms_min + max_diff > sum_max {
                for term in self.terms[num_fixed..].iter() {
                    let new_max = sum_max - (sum_terms_min - context.lower_bound(term) as i64);
                    if new_max < context.upper_bound(term) as i64 {
                        let new_max = match i32::try_from(new_max) {
                            Ok(bound) => bound,
                            Err(_) => return Err(EmptyDomain),
                        };
                        context.set_upper_bound(term, new_max)?;
                        tightened = true;
                    }
                }
            }
        }

        // Both registers are persisted together so the partition and the
        // accumulator cannot diverge across backtracking. On failure the
        // registers are left untouched; the trail restores them.
        context.assign(self.num_fixed, num_fixed as i64);
        context.assign(self.fixed_sum, fixed_sum);

        Ok(())
    }
}
