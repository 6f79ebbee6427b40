//! Module providing JSON IO for reaction networks
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reaction_network::network::{NetworkError, ReactionNetwork};
use crate::reaction_network::reaction::ElementaryReaction;

// region JSON Network
/// Represents a JSON serialized network, used for reading and writing networks in json format
#[derive(Serialize, Deserialize)]
struct JsonNetwork {
    /// Species names mapped to concentrations, in registration order
    species: IndexMap<String, f64>,
    reactions: Vec<JsonReaction>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    reactants: Vec<String>,
    products: Vec<String>,
    rate_constant: f64,
}
// endregion JSON Network

// region Conversions
impl From<JsonReaction> for ElementaryReaction {
    fn from(r: JsonReaction) -> Self {
        ElementaryReaction::new(r.reactants, r.products, r.rate_constant)
    }
}

impl From<&ElementaryReaction> for JsonReaction {
    fn from(r: &ElementaryReaction) -> Self {
        Self {
            reactants: r.reactants().to_vec(),
            products: r.products().to_vec(),
            rate_constant: r.rate_constant(),
        }
    }
}

impl ReactionNetwork {
    /// Read a network, including its current concentrations, from a json file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ReactionNetwork, JsonError> {
        let network_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        ReactionNetwork::from_json_str(&network_str)
    }

    /// Write the network, including its current concentrations, to a json file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn from_json_str(data: &str) -> Result<ReactionNetwork, JsonError> {
        let json_network = match serde_json::from_str::<JsonNetwork>(data) {
            Ok(network) => network,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        ReactionNetwork::from_json(json_network)
    }

    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    fn from_json(json_network: JsonNetwork) -> Result<Self, JsonError> {
        let mut network = ReactionNetwork::new();
        for (name, concentration) in json_network.species {
            network.add_species(&name)?;
            network.set_concentration(&name, concentration)?;
        }
        for reaction in json_network.reactions {
            network.add_reaction(reaction.into())?;
        }
        Ok(network)
    }

    fn to_json(&self) -> JsonNetwork {
        JsonNetwork {
            species: self.species.clone(),
            reactions: self.reactions.iter().map(JsonReaction::from).collect(),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Json network is inconsistent")]
    Network(#[from] NetworkError),
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::io::spec_parse::read_specification;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn json_reaction() {
        let data = r#"{
"reactants":["B","X"],
"products":["X","X","Z"],
"rate_constant":8000.0
}"#;
        let reaction: JsonReaction = serde_json::from_str(data).unwrap();
        let reaction = ElementaryReaction::from(reaction);
        assert_eq!(reaction.reactants(), &["B".to_string(), "X".to_string()]);
        assert_eq!(reaction.products().len(), 3);
        assert!((reaction.rate_constant() - 8000.).abs() < 1e-25);
    }

    #[test]
    fn json_network() {
        let data = r#"{
"species":{"A":1.0,"B":0.25},
"reactions":[{"reactants":["A"],"products":["B"],"rate_constant":2.0}]
}"#;
        let network = ReactionNetwork::from_json_str(data).unwrap();
        assert!((network.concentration("A").unwrap() - 1.0).abs() < 1e-25);
        assert!((network.concentration("B").unwrap() - 0.25).abs() < 1e-25);
        assert_eq!(network.reactions().len(), 1);
    }

    #[test]
    fn inconsistent_json_network() {
        let data = r#"{
"species":{"A":1.0},
"reactions":[{"reactants":["A"],"products":["B"],"rate_constant":2.0}]
}"#;
        match ReactionNetwork::from_json_str(data) {
            Err(JsonError::Network(err)) => {
                assert_eq!(err, NetworkError::UnknownSpecies("B".to_string()))
            }
            _ => panic!("Expected an unknown species error"),
        }
        assert!(matches!(
            ReactionNetwork::from_json_str("{\"species\": 3}"),
            Err(JsonError::UnableToParse(_))
        ));
    }

    #[test]
    fn write_then_read() {
        let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("networks")
            .join("oregonator.txt");
        let mut network = read_specification(data_path).unwrap();
        network.set_concentration("A", 0.06).unwrap();
        network.set_concentration("X", 10f64.powf(-9.8)).unwrap();

        let file = NamedTempFile::new().unwrap();
        network.write_json(file.path()).unwrap();
        let read_back = ReactionNetwork::read_json(file.path()).unwrap();

        let names: Vec<&String> = read_back.species().keys().collect();
        assert_eq!(names, vec!["A", "B", "P", "Q", "X", "Y", "Z"]);
        assert!((read_back.concentration("A").unwrap() - 0.06).abs() < 1e-15);
        let x = read_back.concentration("X").unwrap();
        assert!((x - 10f64.powf(-9.8)).abs() < 1e-22);
        assert_eq!(read_back.reactions().len(), network.reactions().len());
        for (read, original) in read_back.reactions().iter().zip(network.reactions()) {
            assert_eq!(read.reactants(), original.reactants());
            assert_eq!(read.products(), original.products());
            assert!((read.rate_constant() - original.rate_constant()).abs() < 1e-6);
        }
    }
}
