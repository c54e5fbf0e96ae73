pub mod add_line_ops;
mod fixme_note;
mod import_context;
pub mod line_relation_ops;
pub mod stop_resolution_ops;

pub use fixme_note::FixmeNote;
pub use import_context::ImportContext;
