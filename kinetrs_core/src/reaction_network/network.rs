//! This module provides the ReactionNetwork struct, which owns species concentrations and the
//! elementary reactions acting on them
use indexmap::IndexMap;
use thiserror::Error;

use crate::reaction_network::reaction::ElementaryReaction;

/// A well-mixed system of species and the reactions between them
#[derive(Clone, Debug, Default)]
pub struct ReactionNetwork {
    /// Map of species names to concentrations, in registration order
    pub(crate) species: IndexMap<String, f64>,
    /// Registered reactions, in registration order
    pub(crate) reactions: Vec<ElementaryReaction>,
    /// Species indices of each registered reaction (parallel to `reactions`)
    pub(crate) resolved: Vec<ResolvedReaction>,
}

/// Reactant and product positions in the species table
#[derive(Clone, Debug)]
pub(crate) struct ResolvedReaction {
    pub(crate) reactants: Vec<usize>,
    pub(crate) products: Vec<usize>,
}

impl ReactionNetwork {
    pub fn new() -> Self {
        ReactionNetwork::default()
    }

    /// Add a species to the network, with an initial concentration of 0
    ///
    /// # Examples
    /// ```rust
    /// use kinetrs_core::reaction_network::network::ReactionNetwork;
    /// let mut network = ReactionNetwork::new();
    /// network.add_species("A").unwrap();
    /// assert!(network.add_species("A").is_err());
    /// ```
    pub fn add_species(&mut self, name: &str) -> Result<(), NetworkError> {
        if self.species.contains_key(name) {
            return Err(NetworkError::DuplicateSpecies(name.to_string()));
        }
        self.species.insert(name.to_string(), 0.);
        Ok(())
    }

    /// Overwrite the concentration of an existing species
    pub fn set_concentration(&mut self, name: &str, concentration: f64) -> Result<(), NetworkError> {
        match self.species.get_mut(name) {
            Some(c) => {
                *c = concentration;
                Ok(())
            }
            None => Err(NetworkError::UnknownSpecies(name.to_string())),
        }
    }

    /// Current concentration of a species
    pub fn concentration(&self, name: &str) -> Result<f64, NetworkError> {
        self.species
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownSpecies(name.to_string()))
    }

    /// Add an elementary reaction to the network
    ///
    /// Every reactant and product must already be registered, otherwise the reaction is
    /// rejected and the network is left unchanged. Registration order is the order in which
    /// the integrators visit reactions.
    ///
    /// # Examples
    /// ```rust
    /// use kinetrs_core::reaction_network::network::ReactionNetwork;
    /// use kinetrs_core::reaction_network::reaction::ElementaryReaction;
    /// let mut network = ReactionNetwork::new();
    /// network.add_species("A").unwrap();
    /// network.add_species("B").unwrap();
    /// let reaction = ElementaryReaction::new(vec!["A".to_string()], vec!["B".to_string()], 1.0);
    /// network.add_reaction(reaction).unwrap();
    /// assert_eq!(network.reactions().len(), 1);
    /// ```
    pub fn add_reaction(&mut self, reaction: ElementaryReaction) -> Result<(), NetworkError> {
        let reactants = self.resolve(reaction.reactants())?;
        let products = self.resolve(reaction.products())?;
        self.reactions.push(reaction);
        self.resolved.push(ResolvedReaction {
            reactants,
            products,
        });
        Ok(())
    }

    fn resolve(&self, names: &[String]) -> Result<Vec<usize>, NetworkError> {
        names
            .iter()
            .map(|name| {
                self.species
                    .get_index_of(name)
                    .ok_or_else(|| NetworkError::UnknownSpecies(name.clone()))
            })
            .collect()
    }

    /// Map of species names to their current concentrations
    pub fn species(&self) -> &IndexMap<String, f64> {
        &self.species
    }

    pub fn reactions(&self) -> &[ElementaryReaction] {
        &self.reactions
    }

    /// Mutable access to the registered reactions
    ///
    /// Only the rate constants can be changed through this slice, so the network's
    /// species bookkeeping stays valid.
    pub fn reactions_mut(&mut self) -> &mut [ElementaryReaction] {
        &mut self.reactions
    }

    /// Set the rate constant of the reaction at `index` (registration order)
    pub fn set_rate_constant(&mut self, index: usize, rate_constant: f64) -> Result<(), NetworkError> {
        match self.reactions.get_mut(index) {
            Some(reaction) => {
                reaction.set_rate_constant(rate_constant);
                Ok(())
            }
            None => Err(NetworkError::UnknownReaction(index)),
        }
    }

    /// Sum of all species concentrations
    pub fn total_concentration(&self) -> f64 {
        self.species.values().sum()
    }

    /// Current concentrations in species registration order
    pub(crate) fn concentrations(&self) -> Vec<f64> {
        self.species.values().copied().collect()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("Species {0} is already present in the network")]
    DuplicateSpecies(String),
    #[error("Species {0} is not present in the network")]
    UnknownSpecies(String),
    #[error("No reaction registered at index {0}")]
    UnknownReaction(usize),
}

#[cfg(test)]
mod network_tests {
    use super::*;

    fn setup_network() -> ReactionNetwork {
        let mut network = ReactionNetwork::new();
        network.add_species("D").unwrap();
        network.add_species("I").unwrap();
        network.add_species("N").unwrap();
        network
    }

    #[test]
    fn species_start_at_zero() {
        let network = setup_network();
        assert_eq!(network.species().len(), 3);
        for (_, c) in network.species() {
            assert!(c.abs() < 1e-25);
        }
        let names: Vec<&String> = network.species().keys().collect();
        assert_eq!(names, vec!["D", "I", "N"]);
    }

    #[test]
    fn duplicate_species() {
        let mut network = setup_network();
        assert_eq!(
            network.add_species("I"),
            Err(NetworkError::DuplicateSpecies("I".to_string()))
        );
        assert_eq!(network.species().len(), 3);
    }

    #[test]
    fn set_concentration() {
        let mut network = setup_network();
        network.set_concentration("N", 1.0).unwrap();
        assert!((network.concentration("N").unwrap() - 1.0).abs() < 1e-25);
        assert_eq!(
            network.set_concentration("U", 1.0),
            Err(NetworkError::UnknownSpecies("U".to_string()))
        );
        assert!(network.concentration("U").is_err());
    }

    #[test]
    fn unknown_species_leaves_reactions_unchanged() {
        let mut network = setup_network();
        network
            .add_reaction(ElementaryReaction::new(
                vec!["D".to_string()],
                vec!["I".to_string()],
                26000.,
            ))
            .unwrap();
        // The unknown species is a product, after a valid reactant
        let result = network.add_reaction(ElementaryReaction::new(
            vec!["I".to_string()],
            vec!["U".to_string()],
            730.,
        ));
        assert_eq!(result, Err(NetworkError::UnknownSpecies("U".to_string())));
        assert_eq!(network.reactions().len(), 1);
        assert_eq!(network.resolved.len(), 1);
    }

    #[test]
    fn repeated_reactants_resolve_to_same_index() {
        let mut network = setup_network();
        network
            .add_reaction(ElementaryReaction::new(
                vec!["I".to_string(), "I".to_string()],
                vec!["N".to_string()],
                1.,
            ))
            .unwrap();
        assert_eq!(network.resolved[0].reactants, vec![1, 1]);
        assert_eq!(network.resolved[0].products, vec![2]);
    }

    #[test]
    fn set_rate_constant() {
        let mut network = setup_network();
        network
            .add_reaction(ElementaryReaction::new(
                vec!["N".to_string()],
                vec!["I".to_string()],
                7.5e-4,
            ))
            .unwrap();
        network.set_rate_constant(0, 2e-3).unwrap();
        assert!((network.reactions()[0].rate_constant() - 2e-3).abs() < 1e-25);
        network.reactions_mut()[0].set_rate_constant(3e-3);
        assert!((network.reactions()[0].rate_constant() - 3e-3).abs() < 1e-25);
        assert_eq!(
            network.set_rate_constant(4, 1.),
            Err(NetworkError::UnknownReaction(4))
        );
    }

    #[test]
    fn total_concentration() {
        let mut network = setup_network();
        network.set_concentration("D", 0.25).unwrap();
        network.set_concentration("N", 0.5).unwrap();
        assert!((network.total_concentration() - 0.75).abs() < 1e-15);
    }
}
