pub mod favorites;
pub mod generate;
pub mod repl;
