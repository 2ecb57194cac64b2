//! Sort-position bookkeeping for the items of a meal.
//!
//! Every mutation of a meal's item list (insert, move, update, delete,
//! transfer to another meal) can leave `sort_position` values duplicated or
//! gapped. [`reconcile`] restores the dense 1-based order and reports which
//! items actually changed so only those need to be written back.
//!
//! The array order handed in is authoritative; stored positions are treated
//! as advisory data that is refreshed.

mod ops;
mod reconcile;

pub use ops::{
    insert_item, move_item, remove_item, transfer_item, update_position, Transfer,
    TransferRequest,
};
pub use reconcile::{is_dense, reconcile, Reconciliation};
