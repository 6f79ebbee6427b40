//! Module providing the reaction network model, its integrators, and the spatial line of cells

mod integrators;
pub mod network;
pub mod reaction;
pub mod spatial;
