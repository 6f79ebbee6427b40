//! This module provides a struct for representing elementary reactions
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Represents an elementary reaction governed by mass-action kinetics
///
/// Stoichiometry is expressed by repetition: a species listed twice among the reactants
/// contributes its concentration twice to the rate, and is consumed twice per event.
///
/// # Examples
/// ```rust
/// use kinetrs_core::reaction_network::reaction::ElementaryReactionBuilder;
/// let dimerization = ElementaryReactionBuilder::default()
///     .reactants(vec!["X".to_string(), "X".to_string()])
///     .products(vec!["Q".to_string()])
///     .rate_constant(4e7)
///     .build()
///     .unwrap();
/// assert_eq!(dimerization.reactants().len(), 2);
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct ElementaryReaction {
    /// Names of the consumed species, in input order
    reactants: Vec<String>,
    /// Names of the produced species, in input order
    products: Vec<String>,
    /// Mass-action rate constant
    #[builder(default = "0.")]
    rate_constant: f64,
}

impl ElementaryReaction {
    pub fn new(reactants: Vec<String>, products: Vec<String>, rate_constant: f64) -> Self {
        ElementaryReaction {
            reactants,
            products,
            rate_constant,
        }
    }

    pub fn reactants(&self) -> &[String] {
        &self.reactants
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn rate_constant(&self) -> f64 {
        self.rate_constant
    }

    /// Replace the rate constant, e.g. to model denaturant dependent kinetics
    pub fn set_rate_constant(&mut self, rate_constant: f64) {
        self.rate_constant = rate_constant;
    }

    /// Iterate over every species name referenced by the reaction (reactants first)
    pub fn species(&self) -> impl Iterator<Item = &String> {
        self.reactants.iter().chain(self.products.iter())
    }
}

impl Display for ElementaryReaction {
    /// Writes the reaction in the specification file grammar, `A B - C k`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} {}",
            self.reactants.join(" "),
            self.products.join(" "),
            self.rate_constant
        )
    }
}

#[cfg(test)]
mod reaction_tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let reaction = ElementaryReactionBuilder::default()
            .reactants(vec!["A".to_string()])
            .products(vec!["B".to_string()])
            .build()
            .unwrap();
        assert!((reaction.rate_constant() - 0.).abs() < 1e-25);
    }

    #[test]
    fn builder_requires_species() {
        let result = ElementaryReactionBuilder::default()
            .products(vec!["B".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rate_constant_is_mutable() {
        let mut reaction =
            ElementaryReaction::new(vec!["N".to_string()], vec!["I".to_string()], 7.5e-4);
        reaction.set_rate_constant(1.5e-3);
        assert!((reaction.rate_constant() - 1.5e-3).abs() < 1e-25);
        assert_eq!(reaction.reactants(), &["N".to_string()]);
    }

    #[test]
    fn display() {
        let reaction = ElementaryReaction::new(
            vec!["B".to_string(), "X".to_string()],
            vec!["X".to_string(), "X".to_string(), "Z".to_string()],
            8000.,
        );
        assert_eq!(format!("{}", reaction), "B X - X X Z 8000");
        let species: Vec<&String> = reaction.species().collect();
        assert_eq!(species.len(), 5);
    }
}
