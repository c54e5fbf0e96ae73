pub mod add_line;
pub mod export;
