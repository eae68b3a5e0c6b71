pub mod display;

pub use display::DisplayFormatter;
