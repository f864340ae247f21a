//! Ledger model
//!
//! The ledger holds everything the user edits: persons, named groups of
//! persons, expenses and prepayments. Balances are never stored here; they are
//! derived on demand by the balance service.
//!
//! Expenses reference groups by name, and the split always uses the group's
//! *current* membership. Editing a group therefore changes the split of every
//! expense that already references it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::expense::Expense;
use super::prepayment::Prepayment;
use crate::error::{TallyError, TallyResult};

/// Group name -> member names, in insertion order
pub type Groups = IndexMap<String, Vec<String>>;

const MAX_NAME_LEN: usize = 100;

/// The complete editable state: persons, groups, expenses and prepayments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    persons: Vec<String>,

    #[serde(default)]
    groups: Groups,

    #[serde(default)]
    expenses: Vec<Expense>,

    #[serde(default)]
    prepayments: Vec<Prepayment>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from raw parts without validating references
    pub fn from_parts(
        persons: Vec<String>,
        groups: Groups,
        expenses: Vec<Expense>,
        prepayments: Vec<Prepayment>,
    ) -> Self {
        Self {
            persons,
            groups,
            expenses,
            prepayments,
        }
    }

    pub fn persons(&self) -> &[String] {
        &self.persons
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn prepayments(&self) -> &[Prepayment] {
        &self.prepayments
    }

    /// Members of a group, if it exists
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn has_person(&self, name: &str) -> bool {
        self.persons.iter().any(|p| p == name)
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.groups.is_empty()
            && self.expenses.is_empty()
            && self.prepayments.is_empty()
    }

    /// Names of all groups the person belongs to
    pub fn groups_of(&self, person: &str) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == person))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of expenses split across the given group
    pub fn expenses_in_group(&self, group: &str) -> usize {
        self.expenses.iter().filter(|e| e.group == group).count()
    }

    /// Whether any expense or prepayment names this person
    pub fn is_referenced(&self, person: &str) -> bool {
        self.expenses.iter().any(|e| e.payer == person)
            || self
                .prepayments
                .iter()
                .any(|p| p.payer == person || p.recipient == person)
    }

    /// Add a person, and optionally put them in an existing group
    ///
    /// Returns `true` if the person was not known before. Adding a known person
    /// is not an error; it only updates group membership.
    pub fn add_person(&mut self, name: &str, group: Option<&str>) -> TallyResult<bool> {
        let name = normalize_name("Person", name)?;

        if let Some(group) = group {
            if !self.groups.contains_key(group) {
                return Err(TallyError::group_not_found(group));
            }
        }

        let added = if self.has_person(&name) {
            false
        } else {
            self.persons.push(name.clone());
            true
        };

        if let Some(group) = group {
            if let Some(members) = self.groups.get_mut(group) {
                if !members.contains(&name) {
                    debug!(person = %name, group, "adding group member");
                    members.push(name);
                }
            }
        }

        Ok(added)
    }

    /// Remove a person from a group
    ///
    /// A person who no longer belongs to any group is dropped from the person
    /// list as well; the return value reports whether that happened. The
    /// removal is refused if it would empty a group that expenses still split
    /// across, or drop a person that records still name.
    pub fn remove_person_from_group(&mut self, name: &str, group: &str) -> TallyResult<bool> {
        let members = self
            .groups
            .get(group)
            .ok_or_else(|| TallyError::group_not_found(group))?;

        if !members.iter().any(|m| m == name) {
            return Err(TallyError::Validation(format!(
                "'{}' is not a member of group '{}'",
                name, group
            )));
        }

        let referencing = self.expenses_in_group(group);
        if members.len() == 1 && referencing > 0 {
            return Err(TallyError::Validation(format!(
                "Cannot remove the last member of group '{}': {} expense(s) are split across it",
                group, referencing
            )));
        }

        let in_other_group = self
            .groups
            .iter()
            .any(|(g, m)| g != group && m.iter().any(|x| x == name));

        if !in_other_group && self.is_referenced(name) {
            return Err(TallyError::Validation(format!(
                "Cannot remove '{}' from their last group: expenses or prepayments still name them",
                name
            )));
        }

        if let Some(members) = self.groups.get_mut(group) {
            members.retain(|m| m != name);
        }

        if in_other_group {
            Ok(false)
        } else {
            debug!(person = name, "person left their last group, removing");
            self.persons.retain(|p| p != name);
            Ok(true)
        }
    }

    /// Remove a person who belongs to no group and is named by no record
    pub fn remove_person(&mut self, name: &str) -> TallyResult<()> {
        if !self.has_person(name) {
            return Err(TallyError::person_not_found(name));
        }

        let groups = self.groups_of(name);
        if !groups.is_empty() {
            return Err(TallyError::Validation(format!(
                "'{}' is still a member of: {}",
                name,
                groups.join(", ")
            )));
        }

        if self.is_referenced(name) {
            return Err(TallyError::Validation(format!(
                "'{}' is still named by expenses or prepayments",
                name
            )));
        }

        self.persons.retain(|p| p != name);
        Ok(())
    }

    /// Create a new group; unknown members are added as persons
    pub fn create_group(&mut self, name: &str, members: &[String]) -> TallyResult<()> {
        let name = normalize_name("Group", name)?;

        if self.groups.contains_key(&name) {
            return Err(TallyError::Duplicate {
                entity_type: "Group",
                identifier: name,
            });
        }

        let mut group_members: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            let member = normalize_name("Person", member)?;
            if !group_members.contains(&member) {
                group_members.push(member);
            }
        }

        for member in &group_members {
            if !self.has_person(member) {
                self.persons.push(member.clone());
            }
        }

        debug!(group = %name, members = group_members.len(), "creating group");
        self.groups.insert(name, group_members);
        Ok(())
    }

    /// Delete a group no expense splits across; returns its former members
    pub fn delete_group(&mut self, name: &str) -> TallyResult<Vec<String>> {
        if !self.groups.contains_key(name) {
            return Err(TallyError::group_not_found(name));
        }

        let referencing = self.expenses_in_group(name);
        if referencing > 0 {
            return Err(TallyError::Validation(format!(
                "Group '{}' is used by {} expense(s)",
                name, referencing
            )));
        }

        Ok(self.groups.shift_remove(name).unwrap_or_default())
    }

    /// Rename a group and every expense that references it
    ///
    /// Returns the number of expenses that were rewritten.
    pub fn rename_group(&mut self, old_name: &str, new_name: &str) -> TallyResult<usize> {
        if !self.groups.contains_key(old_name) {
            return Err(TallyError::group_not_found(old_name));
        }

        let new_name = normalize_name("Group", new_name)?;
        if new_name == old_name {
            return Ok(0);
        }

        if self.groups.contains_key(&new_name) {
            return Err(TallyError::Duplicate {
                entity_type: "Group",
                identifier: new_name,
            });
        }

        self.groups = std::mem::take(&mut self.groups)
            .into_iter()
            .map(|(name, members)| {
                if name == old_name {
                    (new_name.clone(), members)
                } else {
                    (name, members)
                }
            })
            .collect();

        let mut rewritten = 0;
        for expense in self.expenses.iter_mut().filter(|e| e.group == old_name) {
            expense.group = new_name.clone();
            rewritten += 1;
        }

        Ok(rewritten)
    }

    /// Replace the expense at `index`, or append when `index` is `None` or out
    /// of range. Returns the index the expense ended up at.
    pub fn upsert_expense(&mut self, expense: Expense, index: Option<usize>) -> TallyResult<usize> {
        expense
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        self.check_expense_refs(&expense)?;

        match index {
            Some(i) if i < self.expenses.len() => {
                self.expenses[i] = expense;
                Ok(i)
            }
            _ => {
                self.expenses.push(expense);
                Ok(self.expenses.len() - 1)
            }
        }
    }

    /// Remove the expense at `index`; `None` if out of range
    pub fn remove_expense(&mut self, index: usize) -> Option<Expense> {
        (index < self.expenses.len()).then(|| self.expenses.remove(index))
    }

    /// Replace the prepayment at `index`, or append when `index` is `None` or
    /// out of range. Returns the index the prepayment ended up at.
    pub fn upsert_prepayment(
        &mut self,
        prepayment: Prepayment,
        index: Option<usize>,
    ) -> TallyResult<usize> {
        prepayment
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        self.check_prepayment_refs(&prepayment)?;

        match index {
            Some(i) if i < self.prepayments.len() => {
                self.prepayments[i] = prepayment;
                Ok(i)
            }
            _ => {
                self.prepayments.push(prepayment);
                Ok(self.prepayments.len() - 1)
            }
        }
    }

    /// Remove the prepayment at `index`; `None` if out of range
    pub fn remove_prepayment(&mut self, index: usize) -> Option<Prepayment> {
        (index < self.prepayments.len()).then(|| self.prepayments.remove(index))
    }

    /// Check every reference in the ledger
    ///
    /// Group members, payers and recipients must be known persons, and every
    /// expense must name an existing, non-empty group.
    pub fn validate(&self) -> TallyResult<()> {
        for (group, members) in &self.groups {
            if let Some(unknown) = members.iter().find(|m| !self.has_person(m)) {
                return Err(TallyError::Validation(format!(
                    "Group '{}' has unknown member '{}'",
                    group, unknown
                )));
            }
        }

        for (i, expense) in self.expenses.iter().enumerate() {
            expense
                .validate()
                .map_err(|e| TallyError::Validation(format!("Expense #{}: {}", i + 1, e)))?;
            self.check_expense_refs(expense).map_err(|e| {
                TallyError::Validation(format!("Expense #{}: {}", i + 1, reason(e)))
            })?;
        }

        for (i, prepayment) in self.prepayments.iter().enumerate() {
            prepayment
                .validate()
                .map_err(|e| TallyError::Validation(format!("Prepayment #{}: {}", i + 1, e)))?;
            self.check_prepayment_refs(prepayment).map_err(|e| {
                TallyError::Validation(format!("Prepayment #{}: {}", i + 1, reason(e)))
            })?;
        }

        Ok(())
    }

    fn check_expense_refs(&self, expense: &Expense) -> TallyResult<()> {
        if !self.has_person(&expense.payer) {
            return Err(TallyError::person_not_found(&expense.payer));
        }

        let members = self
            .groups
            .get(&expense.group)
            .ok_or_else(|| TallyError::group_not_found(&expense.group))?;

        if members.is_empty() {
            return Err(TallyError::Validation(format!(
                "Group '{}' has no members to split across",
                expense.group
            )));
        }

        Ok(())
    }

    fn check_prepayment_refs(&self, prepayment: &Prepayment) -> TallyResult<()> {
        if !self.has_person(&prepayment.payer) {
            return Err(TallyError::person_not_found(&prepayment.payer));
        }

        if !self.has_person(&prepayment.recipient) {
            return Err(TallyError::person_not_found(&prepayment.recipient));
        }

        Ok(())
    }
}

/// Strip the "Validation error: " prefix so nested messages read cleanly
fn reason(err: TallyError) -> String {
    match err {
        TallyError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

/// Trim a person or group name and check it is usable
fn normalize_name(kind: &str, name: &str) -> TallyResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TallyError::Validation(format!("{} name cannot be empty", kind)));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(TallyError::Validation(format!(
            "{} name too long ({} chars, max {})",
            kind,
            name.len(),
            MAX_NAME_LEN
        )));
    }

    Ok(name.to_string())
}
