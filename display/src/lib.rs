pub use display::{Display, DisplayError, Palette};

mod display;
