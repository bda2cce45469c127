/*!
The variable/equation store, accessed via fields on an [XorMatrix] struct.

Things stored include:
- The truth state of every variable, as an optional bool.
- Live membership of each row and each column, as mutually consistent [SparseSet]s.
- Per-row `nb_unknowns`/`nb_trues` counters.
- The basis maps: which variable is the pivot (base) of which row, and conversely.

# Membership discipline

Fixing a variable does *not* detach it from its rows; only the counters move.
A true-valued variable remains a live member of every row it started in, which is what lets [xor](XorMatrix::xor) maintain the counters of a combined row, and lets the base-equality sweeps compare rows member-by-member.
A variable leaves its rows only through [remove_variable](XorMatrix::remove_variable), once it is fixed false and fully processed.

Removal is asymmetric, mirroring a dancing-links unlink:
- [remove_equation](XorMatrix::remove_equation) detaches the row from every member's column but keeps the row's own member set, so the row can answer queries and be restored.
- [remove_variable](XorMatrix::remove_variable) detaches the variable from every containing row but keeps its own column set.

The bipartite invariant — `v ∈ rows[e] ⟺ e ∈ cols[v]` — therefore holds between *active* variables and equations, except transiently inside a composite undo.

Every mutator runs in time linear in the touched row or column, with no allocation.
*/

use crate::{
    generic::sparse_set::SparseSet,
    misc::log::targets::{self},
    structures::{equation::EquationIndex, variable::Variable},
    types::err::BuildError,
};

/// The matrix: truth states, live adjacency, counters, and the basis.
pub struct XorMatrix {
    /// The truth state of each variable.
    values: Vec<Option<bool>>,

    /// Live variable members of each equation.
    rows: Vec<SparseSet>,

    /// Live equation memberships of each variable.
    cols: Vec<SparseSet>,

    /// False once an equation has been retired.
    equation_active: Vec<bool>,

    /// False once a variable has been removed.
    variable_active: Vec<bool>,

    /// Per-equation count of members with no value.
    nb_unknowns: Vec<u32>,

    /// Per-equation count of members fixed true.
    nb_trues: Vec<u32>,

    /// The pivot row of a base variable, if any.
    pivot_of: Vec<Option<EquationIndex>>,

    /// The base variable of a row, if any.
    base_of: Vec<Option<Variable>>,

    /// A count of variables with no value.
    undefined_count: usize,
}

impl XorMatrix {
    /// A matrix over `nb_variables` variables, one row per equation, each equation given as the set of its member variables.
    pub fn new(nb_variables: usize, equations: &[Vec<Variable>]) -> Result<Self, BuildError> {
        let nb_equations = equations.len();

        let mut matrix = XorMatrix {
            values: vec![None; nb_variables],
            rows: vec![SparseSet::new(nb_variables); nb_equations],
            cols: vec![SparseSet::new(nb_equations); nb_variables],
            equation_active: vec![true; nb_equations],
            variable_active: vec![true; nb_variables],
            nb_unknowns: vec![0; nb_equations],
            nb_trues: vec![0; nb_equations],
            pivot_of: vec![None; nb_variables],
            base_of: vec![None; nb_equations],
            undefined_count: nb_variables,
        };

        for (equation, members) in equations.iter().enumerate() {
            for &variable in members {
                if variable as usize >= nb_variables {
                    return Err(BuildError::VariableOutOfBounds);
                }
                if !matrix.rows[equation].insert(variable) {
                    return Err(BuildError::RepeatedVariable);
                }
                matrix.cols[variable as usize].insert(equation as EquationIndex);
            }
            matrix.nb_unknowns[equation] = members.len() as u32;
        }

        Ok(matrix)
    }

    /// A count of variables in the matrix.
    pub fn nb_variables(&self) -> usize {
        self.values.len()
    }

    /// A count of equations in the matrix, active or not.
    pub fn nb_equations(&self) -> usize {
        self.rows.len()
    }

    /// A count of variables with no value.
    pub fn undefined_count(&self) -> usize {
        self.undefined_count
    }

    /// The truth state of `variable`.
    pub fn value_of(&self, variable: Variable) -> Option<bool> {
        self.values[variable as usize]
    }

    /// True if `variable` is fixed true.
    pub fn is_true(&self, variable: Variable) -> bool {
        self.values[variable as usize] == Some(true)
    }

    /// True if `variable` is fixed false.
    pub fn is_false(&self, variable: Variable) -> bool {
        self.values[variable as usize] == Some(false)
    }

    /// True if `variable` has no value.
    pub fn is_undefined(&self, variable: Variable) -> bool {
        self.values[variable as usize].is_none()
    }

    /// True if `equation` has not been retired.
    pub fn is_active(&self, equation: EquationIndex) -> bool {
        self.equation_active[equation as usize]
    }

    /// True if `variable` has not been removed.
    pub fn is_active_variable(&self, variable: Variable) -> bool {
        self.variable_active[variable as usize]
    }

    /// True if `variable` occupies no active row, or is fixed false.
    /// Only such variables may be removed.
    pub fn is_unused(&self, variable: Variable) -> bool {
        self.cols[variable as usize].is_empty() || self.is_false(variable)
    }

    /// An iterator over the indices of active equations.
    pub fn active_equations(&self) -> impl Iterator<Item = EquationIndex> + '_ {
        (0..self.nb_equations() as EquationIndex)
            .filter(|equation| self.equation_active[*equation as usize])
    }
}

/// Row queries.
impl XorMatrix {
    /// The count of true members of `equation`.
    pub fn nb_trues(&self, equation: EquationIndex) -> u32 {
        self.nb_trues[equation as usize]
    }

    /// The count of unknown members of `equation`.
    pub fn nb_unknowns(&self, equation: EquationIndex) -> u32 {
        self.nb_unknowns[equation as usize]
    }

    /// False exactly when `equation` is fully determined with exactly one true member.
    pub fn is_valid(&self, equation: EquationIndex) -> bool {
        self.nb_unknowns[equation as usize] != 0 || self.nb_trues[equation as usize] != 1
    }

    /// True exactly when `equation` is fully determined with exactly one true member.
    pub fn is_invalid(&self, equation: EquationIndex) -> bool {
        !self.is_valid(equation)
    }

    /// True when `equation` has no true and no unknown member, and so is trivially satisfied.
    pub fn is_empty(&self, equation: EquationIndex) -> bool {
        self.nb_trues[equation as usize] == 0 && self.nb_unknowns[equation as usize] == 0
    }

    /// The live members of `equation`, in unspecified order.
    /// Note, members fixed true (and, transiently, false) are included.
    pub fn variables_of(&self, equation: EquationIndex) -> &[Variable] {
        self.rows[equation as usize].as_slice()
    }

    /// The active equations containing `variable`, in unspecified order.
    pub fn equations_of(&self, variable: Variable) -> &[EquationIndex] {
        self.cols[variable as usize].as_slice()
    }

    /// A count of the active equations containing `variable`.
    pub fn occurrence_count(&self, variable: Variable) -> usize {
        self.cols[variable as usize].len()
    }

    /// The lowest-index unknown member of `equation`, if any.
    pub fn first_unknown(&self, equation: EquationIndex) -> Option<Variable> {
        self.rows[equation as usize]
            .iter()
            .filter(|&variable| self.is_undefined(variable))
            .min()
    }

    /// A member of `equation` fit to become its base: not fixed false and not base of any row.
    /// Ties are broken towards the fewest occupied rows (cheapest elimination), then the lowest index.
    pub fn eligible_base(&self, equation: EquationIndex) -> Option<Variable> {
        self.rows[equation as usize]
            .iter()
            .filter(|&variable| {
                self.values[variable as usize] != Some(false) && !self.is_base(variable)
            })
            .min_by_key(|&variable| (self.occurrence_count(variable), variable))
    }

    /// A representative off-base member of `equation`, if any.
    pub fn first_off_base(&self, equation: EquationIndex) -> Option<Variable> {
        self.eligible_base(equation)
    }

    /// True when the two rows have the same off-base live member set.
    pub fn same_off_base_variables(&self, left: EquationIndex, right: EquationIndex) -> bool {
        let mut left_count = 0;
        for variable in self.rows[left as usize].iter() {
            if self.is_base(variable) {
                continue;
            }
            if !self.rows[right as usize].contains(variable) {
                return false;
            }
            left_count += 1;
        }

        let right_base_members = match self.base_of[right as usize] {
            Some(base) if self.rows[right as usize].contains(base) => 1,
            _ => 0,
        };
        left_count == self.rows[right as usize].len() - right_base_members
    }
}

/// Basis queries and mutation.
impl XorMatrix {
    /// True if `variable` is the base of some row.
    pub fn is_base(&self, variable: Variable) -> bool {
        self.pivot_of[variable as usize].is_some()
    }

    /// The pivot row of `variable`, if `variable` is a base.
    pub fn pivot_of(&self, variable: Variable) -> Option<EquationIndex> {
        self.pivot_of[variable as usize]
    }

    /// The base variable of `equation`, if one is installed.
    pub fn base_variable_of(&self, equation: EquationIndex) -> Option<Variable> {
        self.base_of[equation as usize]
    }

    /// Installs `variable` as the base of `equation`.
    /// The counterpart of [set_off_base](XorMatrix::set_off_base).
    pub fn set_base(&mut self, equation: EquationIndex, variable: Variable) {
        debug_assert!(!self.is_base(variable));
        debug_assert!(self.base_of[equation as usize].is_none());
        self.pivot_of[variable as usize] = Some(equation);
        self.base_of[equation as usize] = Some(variable);
    }

    /// Uninstalls `variable` as a base.
    /// The counterpart of [set_base](XorMatrix::set_base).
    pub fn set_off_base(&mut self, variable: Variable) {
        debug_assert!(self.is_base(variable));
        if let Some(equation) = self.pivot_of[variable as usize].take() {
            self.base_of[equation as usize] = None;
        }
    }
}

/// Mutation of values, rows, and columns.
/// Each method here is paired with an exact inverse; [xor](XorMatrix::xor) is its own.
impl XorMatrix {
    /// Gives `variable` a value, adjusting the counters of every active row containing it.
    /// The counterpart of [unset](XorMatrix::unset).
    pub fn fix(&mut self, variable: Variable, value: bool) {
        debug_assert!(self.is_undefined(variable));
        log::trace!(target: targets::MATRIX, "Fix: {variable} ← {value}");

        self.values[variable as usize] = Some(value);
        self.undefined_count -= 1;
        let increment = value as u32;
        for position in 0..self.cols[variable as usize].len() {
            let equation = self.cols[variable as usize].member_at(position) as usize;
            self.nb_unknowns[equation] -= 1;
            self.nb_trues[equation] += increment;
        }
    }

    /// Clears the value of `variable`, reversing the counter deltas of [fix](XorMatrix::fix).
    pub fn unset(&mut self, variable: Variable) {
        log::trace!(target: targets::MATRIX, "Unset: {variable}");
        let decrement = match self.values[variable as usize] {
            Some(value) => value as u32,
            None => {
                debug_assert!(false, "unset of an unvalued variable");
                return;
            }
        };

        self.undefined_count += 1;
        for position in 0..self.cols[variable as usize].len() {
            let equation = self.cols[variable as usize].member_at(position) as usize;
            self.nb_unknowns[equation] += 1;
            self.nb_trues[equation] -= decrement;
        }
        self.values[variable as usize] = None;
    }

    /// Replaces row `target` with the symmetric difference of rows `target` and `pivot`, counters included.
    ///
    /// An involution: applying the same call twice restores `target` exactly, which is how the operation is undone.
    pub fn xor(&mut self, target: EquationIndex, pivot: EquationIndex) {
        debug_assert!(target != pivot);
        debug_assert!(self.is_active(target) && self.is_active(pivot));

        for position in 0..self.rows[pivot as usize].len() {
            let variable = self.rows[pivot as usize].member_at(position);
            if self.rows[target as usize].remove(variable) {
                self.cols[variable as usize].remove(target);
                match self.values[variable as usize] {
                    None => self.nb_unknowns[target as usize] -= 1,
                    Some(true) => self.nb_trues[target as usize] -= 1,
                    Some(false) => {}
                }
            } else {
                self.rows[target as usize].insert(variable);
                self.cols[variable as usize].insert(target);
                match self.values[variable as usize] {
                    None => self.nb_unknowns[target as usize] += 1,
                    Some(true) => self.nb_trues[target as usize] += 1,
                    Some(false) => {}
                }
            }
        }
    }

    /// Retires `equation`, detaching it from the column of every member.
    /// The row's own member set is kept, for queries and for [restore_equation](XorMatrix::restore_equation).
    pub fn remove_equation(&mut self, equation: EquationIndex) {
        debug_assert!(self.is_active(equation));
        log::trace!(target: targets::MATRIX, "Remove equation: {equation}");

        self.equation_active[equation as usize] = false;
        for position in 0..self.rows[equation as usize].len() {
            let variable = self.rows[equation as usize].member_at(position);
            self.cols[variable as usize].remove(equation);
        }
    }

    /// Reactivates `equation`, reattaching it to the column of every member.
    /// The counterpart of [remove_equation](XorMatrix::remove_equation).
    pub fn restore_equation(&mut self, equation: EquationIndex) {
        debug_assert!(!self.is_active(equation));

        self.equation_active[equation as usize] = true;
        for position in 0..self.rows[equation as usize].len() {
            let variable = self.rows[equation as usize].member_at(position);
            self.cols[variable as usize].insert(equation);
        }
    }

    /// Removes `variable`, detaching it from every containing row.
    /// Its own column set is kept, for queries and for [restore_variable](XorMatrix::restore_variable).
    pub fn remove_variable(&mut self, variable: Variable) {
        debug_assert!(self.is_active_variable(variable));
        debug_assert!(self.is_unused(variable));
        log::trace!(target: targets::MATRIX, "Remove variable: {variable}");

        self.variable_active[variable as usize] = false;
        for position in 0..self.cols[variable as usize].len() {
            let equation = self.cols[variable as usize].member_at(position);
            self.rows[equation as usize].remove(variable);
        }
    }

    /// Reinserts `variable` into every row it was detached from.
    /// The counterpart of [remove_variable](XorMatrix::remove_variable).
    pub fn restore_variable(&mut self, variable: Variable) {
        debug_assert!(!self.is_active_variable(variable));

        self.variable_active[variable as usize] = true;
        for position in 0..self.cols[variable as usize].len() {
            let equation = self.cols[variable as usize].member_at(position);
            self.rows[equation as usize].insert(variable);
        }
    }
}

/// The stable-state validator.
impl XorMatrix {
    /// True when every structural invariant holds: adjacency symmetry, counter counts, mutual basis maps, and the reduced-echelon property.
    ///
    /// Intended for debug assertions and property tests at orchestration boundaries; invariants are routinely broken in the middle of a composite action chain.
    pub fn stable_state(&self) -> bool {
        // Adjacency symmetry over active entities.
        for equation in self.active_equations() {
            for variable in self.rows[equation as usize].iter() {
                if !self.variable_active[variable as usize]
                    || !self.cols[variable as usize].contains(equation)
                {
                    log::warn!(target: targets::MATRIX, "Asymmetric adjacency: ({equation}, {variable})");
                    return false;
                }
            }
        }
        for variable in 0..self.nb_variables() as Variable {
            if !self.variable_active[variable as usize] {
                continue;
            }
            for equation in self.cols[variable as usize].iter() {
                if !self.equation_active[equation as usize]
                    || !self.rows[equation as usize].contains(variable)
                {
                    log::warn!(target: targets::MATRIX, "Asymmetric adjacency: ({equation}, {variable})");
                    return false;
                }
            }
        }

        // Counters match a recount of live members.
        for equation in self.active_equations() {
            let mut unknowns = 0;
            let mut trues = 0;
            for variable in self.rows[equation as usize].iter() {
                match self.values[variable as usize] {
                    None => unknowns += 1,
                    Some(true) => trues += 1,
                    Some(false) => {}
                }
            }
            if unknowns != self.nb_unknowns[equation as usize]
                || trues != self.nb_trues[equation as usize]
            {
                log::warn!(target: targets::MATRIX, "Counter drift on equation {equation}");
                return false;
            }
        }

        // Basis maps are mutual inverses, and each base variable occupies only its pivot row.
        for equation in self.active_equations() {
            if let Some(base) = self.base_of[equation as usize] {
                if self.pivot_of[base as usize] != Some(equation)
                    || !self.rows[equation as usize].contains(base)
                {
                    log::warn!(target: targets::BASIS, "Broken basis map on equation {equation}");
                    return false;
                }
            }
        }
        for variable in 0..self.nb_variables() as Variable {
            if !self.variable_active[variable as usize] {
                continue;
            }
            if let Some(pivot) = self.pivot_of[variable as usize] {
                if !self.equation_active[pivot as usize]
                    || self.base_of[pivot as usize] != Some(variable)
                {
                    log::warn!(target: targets::BASIS, "Broken basis map on variable {variable}");
                    return false;
                }
                for equation in self.cols[variable as usize].iter() {
                    if equation != pivot {
                        log::warn!(
                            target: targets::BASIS,
                            "Echelon breach: base {variable} occupies row {equation} beside pivot {pivot}"
                        );
                        return false;
                    }
                }
            }
        }

        true
    }
}
