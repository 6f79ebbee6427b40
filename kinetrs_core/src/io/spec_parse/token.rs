//! Module providing Token struct for lexing reaction specification lines

/// Represents Tokens in a reaction line
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// A species name, or the trailing rate constant before it is interpreted
    Word(String),
    /// The `-` separating reactants from products
    Separator,
    Eol,
}

/// Split a line on whitespace into tokens, terminated by [`Token::Eol`]
pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = line
        .split_whitespace()
        .map(|word| match word {
            "-" => Token::Separator,
            w => Token::Word(w.to_string()),
        })
        .collect();
    tokens.push(Token::Eol);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_line() {
        let tokens = lex_line("X  Y\t- P 1.6e9");
        assert_eq!(
            tokens,
            vec![
                Token::Word("X".to_string()),
                Token::Word("Y".to_string()),
                Token::Separator,
                Token::Word("P".to_string()),
                Token::Word("1.6e9".to_string()),
                Token::Eol,
            ]
        );
    }

    #[test]
    fn negative_number_is_a_word() {
        let tokens = lex_line("-1");
        assert_eq!(tokens[0], Token::Word("-1".to_string()));
    }
}
