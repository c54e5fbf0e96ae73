pub mod name_matching;
pub mod stop_name;
