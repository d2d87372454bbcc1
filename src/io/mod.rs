//! File I/O: the DIMACS-like text format named in spec.md §6. Out of
//! scope for the algorithmic core, in scope for this repository's own
//! CLI collaborator.

pub mod dimacs;
