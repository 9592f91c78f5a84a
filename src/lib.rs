//! Procedural drawing of the two layers of an Android adaptive app icon.

pub mod icon_gen;
pub mod shapes;
