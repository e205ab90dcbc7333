//! Names and JSON metadata for variables and constraints.
//!
//! Both tables are allocated on first write; models that never name anything
//! carry only four `None`s.

use std::collections::BTreeMap;

use quadmip_expr::{ConstraintId, VariableId};
use quadmip_solver::Engine;

use crate::model::Model;
use crate::model::error::ModelError;
use crate::solution::Solution;

fn insert_lazy<K: Ord, V>(table: &mut Option<BTreeMap<K, V>>, key: K, value: V) {
    table.get_or_insert_with(BTreeMap::new).insert(key, value);
}

fn lookup<'a, K: Ord, V>(table: &'a Option<BTreeMap<K, V>>, key: &K) -> Option<&'a V> {
    table.as_ref().and_then(|entries| entries.get(key))
}

/// First key whose name matches. Names are not required to be unique.
fn key_by_name<K: Ord + Copy>(table: &Option<BTreeMap<K, String>>, name: &str) -> Option<K> {
    table
        .iter()
        .flatten()
        .find_map(|(key, value)| (value == name).then_some(*key))
}

impl<E: Engine> Model<E> {
    // ── Variables ───────────────────────────────────────────

    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        insert_lazy(&mut self.variable_names, id, name);
        Ok(())
    }

    pub fn get_variable_name(&self, id: VariableId) -> Option<&str> {
        lookup(&self.variable_names, &id).map(String::as_str)
    }

    /// Lowest id carrying `name`.
    pub fn get_variable_by_name(&self, name: &str) -> Option<VariableId> {
        key_by_name(&self.variable_names, name)
    }

    pub fn set_variable_metadata(
        &mut self,
        id: VariableId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        insert_lazy(&mut self.variable_metadata, id, metadata);
        Ok(())
    }

    pub fn get_variable_metadata(&self, id: VariableId) -> Option<&serde_json::Value> {
        lookup(&self.variable_metadata, &id)
    }

    // ── Constraints ─────────────────────────────────────────

    pub fn set_constraint_name(
        &mut self,
        id: ConstraintId,
        name: String,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        insert_lazy(&mut self.constraint_names, id, name);
        Ok(())
    }

    pub fn get_constraint_name(&self, id: ConstraintId) -> Option<&str> {
        lookup(&self.constraint_names, &id).map(String::as_str)
    }

    pub fn get_constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        key_by_name(&self.constraint_names, name)
    }

    pub fn set_constraint_metadata(
        &mut self,
        id: ConstraintId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        insert_lazy(&mut self.constraint_metadata, id, metadata);
        Ok(())
    }

    pub fn get_constraint_metadata(&self, id: ConstraintId) -> Option<&serde_json::Value> {
        lookup(&self.constraint_metadata, &id)
    }

    /// Variable values keyed by name, for named variables that have a value.
    pub fn named_values(&self, solution: &Solution) -> BTreeMap<String, f64> {
        self.variable_names
            .iter()
            .flatten()
            .filter_map(|(id, name)| solution.value(*id).map(|value| (name.clone(), value)))
            .collect()
    }
}
