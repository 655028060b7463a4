pub mod display;
pub mod maps;
