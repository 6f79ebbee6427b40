//! Core rust implementation of kinetrs, a crate for simulating chemical reaction networks
//! with mass action kinetics.

pub mod configuration;
pub mod io;
pub mod reaction_network;
pub mod simulation;
