pub mod document;
pub mod fragments;
pub mod views;
