//! Filesystem primitives shared by the apply, merge and undo engines.

mod atomic;
mod copy;
mod entry;
mod helpers;
mod metadata;
mod unique;
mod util;

pub use copy::{copy_dir_tree, copy_file_safely};
pub use entry::{relocate, remove_entry, rename_in_place, Relocation};
pub use helpers::{io_error_with_help, mutation_error};
pub use unique::free_name;
pub use util::occupied;
