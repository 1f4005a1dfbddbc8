// Exercise visibility state managers
// Managers own mutable state: the hide map and its persistence.

pub mod visibility_reconciler;
