//! Module for building reaction networks from the plain text specification format
//!
//! The first non-blank line lists the species, separated by whitespace. Every following
//! non-blank line is one elementary reaction,
//!
//! ```text
//! reactant+ - product+ rate_constant
//! ```
//!
//! e.g. `X Y - P 1.6e9`.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::io::spec_parse::parser::{ParseError, ReactionParser};
use crate::io::spec_parse::token::lex_line;
use crate::reaction_network::network::{NetworkError, ReactionNetwork};

pub mod parser;
mod token;

/// Parse a specification string into a new ReactionNetwork
///
/// All species start with a concentration of 0.
///
/// # Examples
/// ```rust
/// use kinetrs_core::io::spec_parse::parse_specification;
/// let network = parse_specification("A B\nA - B 2.0").unwrap();
/// let reaction = &network.reactions()[0];
/// assert_eq!(reaction.reactants(), &["A".to_string()]);
/// assert_eq!(reaction.products(), &["B".to_string()]);
/// assert_eq!(reaction.rate_constant(), 2.0);
/// ```
pub fn parse_specification(input: &str) -> Result<ReactionNetwork, SpecParseError> {
    let mut network = ReactionNetwork::new();
    build_network(input, &mut network)?;
    Ok(network)
}

/// Read a specification file into a new ReactionNetwork
pub fn read_specification<P: AsRef<Path>>(path: P) -> Result<ReactionNetwork, SpecParseError> {
    let input = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => return Err(SpecParseError::UnableToRead(format!("{:?}", err))),
    };
    parse_specification(&input)
}

/// Register the species and reactions of a specification string into `network`
///
/// Errors are returned at the first offending line. Species and reactions registered from
/// earlier lines remain in the network, so callers should discard it on failure.
pub fn build_network(input: &str, network: &mut ReactionNetwork) -> Result<(), SpecParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (line_number, species_line) = match lines.next() {
        Some(line) => line,
        None => return Err(malformed(1, ParseError::MissingSpeciesLine)),
    };
    for species in species_line.split_whitespace() {
        if species == "-" {
            return Err(malformed(line_number, ParseError::SeparatorInSpeciesList));
        }
        network.add_species(species)?;
    }

    for (line_number, line) in lines {
        let mut parser = ReactionParser::new(lex_line(line));
        let reaction = match parser.parse() {
            Ok(reaction) => reaction,
            Err(err) => return Err(malformed(line_number, err)),
        };
        network.add_reaction(reaction)?;
    }
    Ok(())
}

fn malformed(line: usize, source: ParseError) -> SpecParseError {
    SpecParseError::MalformedSpecification { line, source }
}

/// Enum representing possible errors while building a network from a specification
#[derive(Debug, Error)]
pub enum SpecParseError {
    /// A line does not follow the specification grammar
    #[error("Malformed specification on line {line}: {source}")]
    MalformedSpecification { line: usize, source: ParseError },
    /// The specification is well formed but inconsistent (duplicate or unknown species)
    #[error("Unable to build network")]
    Network(#[from] NetworkError),
    #[error("Unable to read specification file due to {0}")]
    UnableToRead(String),
}
