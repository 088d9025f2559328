pub mod gui;
pub mod track;
