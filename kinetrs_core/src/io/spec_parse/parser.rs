use crate::io::spec_parse::token::Token;
use crate::reaction_network::reaction::ElementaryReaction;

use thiserror::Error;
/*
Reaction line grammar:
reaction -> reactants "-" products RATE ;
reactants -> SPECIES+ ;
products -> SPECIES+ ;

e.g. B X - X X Z 8000
The rate constant is always the final token, everything between the separator and it
is a product.
 */

/// Reaction line parser
pub struct ReactionParser {
    /// Vector of tokens from a single line
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl ReactionParser {
    /// Create a new ReactionParser
    pub fn new(tokens: Vec<Token>) -> ReactionParser {
        ReactionParser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into an ElementaryReaction
    pub fn parse(&mut self) -> Result<ElementaryReaction, ParseError> {
        let reactants = self.reactants()?;
        self.consume(Token::Separator)?;
        let mut trailing = self.trailing()?;
        let rate_token = match trailing.pop() {
            Some(token) => token,
            None => return Err(ParseError::MissingRateConstant),
        };
        let rate_constant = match rate_token.parse::<f64>() {
            Ok(k) => k,
            Err(_) => return Err(ParseError::InvalidRateConstant(rate_token)),
        };
        if trailing.is_empty() {
            return Err(ParseError::NoProducts);
        }
        Ok(ElementaryReaction::new(reactants, trailing, rate_constant))
    }

    fn reactants(&mut self) -> Result<Vec<String>, ParseError> {
        let mut reactants = Vec::new();
        while let Some(word) = self.match_word() {
            reactants.push(word);
        }
        if reactants.is_empty() && self.check(Token::Separator) {
            return Err(ParseError::NoReactants);
        }
        Ok(reactants)
    }

    /// Everything after the separator, up to the end of the line
    fn trailing(&mut self) -> Result<Vec<String>, ParseError> {
        let mut words = Vec::new();
        while !self.is_at_end() {
            match self.match_word() {
                Some(word) => words.push(word),
                None => return Err(ParseError::RepeatedSeparator),
            }
        }
        Ok(words)
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// If the current token is a word return `Some(word)` and advance, otherwise return None
    fn match_word(&mut self) -> Option<String> {
        if let Token::Word(word) = self.peek() {
            self.advance();
            return Some(word);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&self, token: Token) -> bool {
        self.peek() == token
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek() == Token::Eol
    }

    /// Get a copy of the current token
    fn peek(&self) -> Token {
        self.tokens.get(self.current).cloned().unwrap_or(Token::Eol)
    }

    /// Advance past `token` if it is the current one, otherwise return an error
    fn consume(&mut self, token: Token) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            return Ok(());
        }
        Err(ParseError::MissingSeparator)
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// The first line, listing the species, is missing
    #[error("No species line found, check that the specification is not empty")]
    MissingSpeciesLine,
    /// `-` used as a species name
    #[error("`-` can't be used as a species name")]
    SeparatorInSpeciesList,
    /// No `-` between reactants and products
    #[error("Missing `-` between reactants and products")]
    MissingSeparator,
    /// Second `-` on the same line
    #[error("More than one `-` found, expected exactly one")]
    RepeatedSeparator,
    #[error("Reaction has no reactants")]
    NoReactants,
    #[error("Reaction has no products")]
    NoProducts,
    #[error("Missing rate constant at the end of the line")]
    MissingRateConstant,
    #[error("Rate constant {0} is not a number")]
    InvalidRateConstant(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::spec_parse::token::lex_line;

    fn parse_line(line: &str) -> Result<ElementaryReaction, ParseError> {
        ReactionParser::new(lex_line(line)).parse()
    }

    #[test]
    fn simple_reaction() {
        let reaction = parse_line("A - B 2.0").unwrap();
        assert_eq!(reaction.reactants(), &["A".to_string()]);
        assert_eq!(reaction.products(), &["B".to_string()]);
        assert!((reaction.rate_constant() - 2.0).abs() < 1e-25);
    }

    #[test]
    fn repeated_species() {
        let reaction = parse_line("B X - X X Z 8e3").unwrap();
        assert_eq!(reaction.reactants(), &["B".to_string(), "X".to_string()]);
        assert_eq!(
            reaction.products(),
            &["X".to_string(), "X".to_string(), "Z".to_string()]
        );
        assert!((reaction.rate_constant() - 8000.).abs() < 1e-25);
    }

    #[test]
    fn missing_separator() {
        assert_eq!(parse_line("A B 2.0"), Err(ParseError::MissingSeparator));
    }

    #[test]
    fn no_reactants() {
        assert_eq!(parse_line("- B 2.0"), Err(ParseError::NoReactants));
    }

    #[test]
    fn no_products() {
        assert_eq!(parse_line("A - 2.0"), Err(ParseError::NoProducts));
    }

    #[test]
    fn missing_rate_constant() {
        assert_eq!(parse_line("A -"), Err(ParseError::MissingRateConstant));
        assert_eq!(
            parse_line("A - B"),
            Err(ParseError::InvalidRateConstant("B".to_string()))
        );
    }

    #[test]
    fn invalid_rate_constant() {
        assert_eq!(
            parse_line("A - B fast"),
            Err(ParseError::InvalidRateConstant("fast".to_string()))
        );
    }

    #[test]
    fn repeated_separator() {
        assert_eq!(parse_line("A - B - C 1"), Err(ParseError::RepeatedSeparator));
    }
}
