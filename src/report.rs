//! Setup statistics for a sealed runtime.
//!
//! The report captures everything size-related about the built tables, in a
//! serializable form. Two runtimes built from the same registrations produce
//! equal reports.

use serde::Serialize;

/// Summary of one `update` pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Participating classes.
    pub classes: usize,
    /// Participating classes that can be a dynamic type.
    pub concrete_classes: usize,
    /// Total length of the global index vector.
    pub index_vector_len: usize,
    /// Total length of the global dispatch vector.
    pub dispatch_vector_len: usize,
    pub methods: Vec<MethodReport>,
}

/// Table shape of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodReport {
    pub name: String,
    pub arity: usize,
    pub overrides: usize,
    /// Index-array slot per virtual parameter.
    pub slots: Vec<usize>,
    /// Per-dimension multiplier into the flat table.
    pub strides: Vec<usize>,
    /// Group count per dimension.
    pub groups: Vec<usize>,
    /// Flat table length, the product of the group counts.
    pub table_len: usize,
}
