mod reconcile;

pub use reconcile::{reconcile, Reconciliation};
