pub mod breaks;
pub mod reorder;
pub mod slots;
