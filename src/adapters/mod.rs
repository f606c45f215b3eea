pub mod registry;
pub mod statement;
