
/// Exception-table search and fix-up.
pub mod extable;
