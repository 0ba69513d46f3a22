// Crate root library declaration and module exports.
pub mod cli;
pub mod command;
pub mod context;
pub mod logic;
pub mod model;
pub mod parser;
pub mod storage;
pub mod store;
