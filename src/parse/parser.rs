use super::ast::{Expression, Node};
use super::error::{ParseError, SourcePosition};
use super::lexer::{lexer, Lexer, TokenKind};
use crate::common::*;
use logos_iter::LogosIter;

type PResult<T = Node> = Result<T, ParseError>;

// Grammar recursion beyond this depth aborts with a dedicated error
// instead of risking call-stack exhaustion on pathological inputs.
const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            depth: 0,
        }
    }

    pub fn parse(mut self) -> PResult<Expression> {
        let root = self.parse_sum()?;
        if self.lexer.peek().is_some() {
            return self.unexpected(&["end of input"]);
        }
        Ok(Expression::new(root))
    }

    fn position(&self) -> SourcePosition {
        SourcePosition {
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected(&[expected.as_str()])
        }
    }

    fn consume_number(&mut self) -> PResult<UInt> {
        match self.lexer.peek() {
            Some(&TokenKind::Number(x)) => {
                self.lexer.next();
                Ok(x)
            }
            _ => self.unexpected(&["<number>"]),
        }
    }

    fn unexpected<T>(&mut self, expected: &[&str]) -> PResult<T> {
        match self.lexer.next() {
            Some(TokenKind::Error) => Err(self.lex_error()),
            Some(_) => Err(ParseError::UnexpectedToken {
                pos: self.position(),
                expected: expected_list(expected),
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: expected_list(expected),
            }),
        }
    }

    // Classifies an `Error` token that has just been taken from the lexer:
    // a digit run only fails by overflowing the number type, an alphabetic
    // run only by not naming a known function, and anything else is a
    // character the language has no use for.
    fn lex_error(&self) -> ParseError {
        let pos = self.position();
        let slice = pos.slice.as_str();
        if slice.is_empty() {
            ParseError::IllegalCharacter(pos)
        } else if slice.chars().all(|c| c.is_ascii_digit()) {
            ParseError::NumberTooLarge(pos)
        } else if matches!(slice, "d" | "D" | "x" | "X") {
            // Reserved operator letters are never identifiers.
            ParseError::IllegalCharacter(pos)
        } else if slice.chars().all(|c| c.is_ascii_alphabetic()) {
            let name = slice.to_ascii_uppercase();
            ParseError::InvalidFunction { pos, name }
        } else {
            ParseError::IllegalCharacter(pos)
        }
    }

    fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(ParseError::TooDeep(self.position()))
        } else {
            Ok(())
        }
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    // sum := mult '+' mult | mult
    //
    // At most one '+' per sum; chained additions need parentheses.
    fn parse_sum(&mut self) -> PResult {
        self.enter()?;
        let lhs = self.parse_mult()?;
        let node = if self.matches(TokenKind::Plus) {
            self.lexer.next();
            let rhs = self.parse_mult()?;
            Node::add(lhs, rhs)
        } else {
            lhs
        };
        self.exit();
        Ok(node)
    }

    // mult := NUMBER 'x' value | value
    //
    // A leading number also begins two `value` productions, so the number
    // is taken first and the following token picks the rule.
    fn parse_mult(&mut self) -> PResult {
        match self.lexer.peek() {
            Some(&TokenKind::Number(n)) => {
                self.lexer.next();
                match self.lexer.peek() {
                    Some(TokenKind::Times) => {
                        self.lexer.next();
                        let node = self.parse_value()?;
                        Ok(Node::mult(n, node))
                    }
                    Some(TokenKind::Die) => {
                        self.lexer.next();
                        let sides = self.consume_number()?;
                        Ok(Node::rolls(n, sides))
                    }
                    _ => Ok(Node::literal(n)),
                }
            }
            _ => self.parse_value(),
        }
    }

    // value := NUMBER 'd' NUMBER | 'd' NUMBER | NUMBER
    //        | IDENT '(' list ')' | '(' sum ')'
    fn parse_value(&mut self) -> PResult {
        match self.lexer.peek() {
            Some(&TokenKind::Number(n)) => {
                self.lexer.next();
                if self.matches(TokenKind::Die) {
                    self.lexer.next();
                    let sides = self.consume_number()?;
                    Ok(Node::rolls(n, sides))
                } else {
                    Ok(Node::literal(n))
                }
            }
            Some(TokenKind::Die) => {
                self.lexer.next();
                let sides = self.consume_number()?;
                Ok(Node::rolls(1, sides))
            }
            Some(&TokenKind::Ident(func)) => {
                self.lexer.next();
                self.consume(TokenKind::LeftParen)?;
                let params = self.parse_list()?;
                self.consume(TokenKind::RightParen)?;
                Ok(Node::func(func, params))
            }
            Some(TokenKind::LeftParen) => {
                self.lexer.next();
                let inner = self.parse_sum()?;
                self.consume(TokenKind::RightParen)?;
                Ok(inner)
            }
            _ => self.unexpected(&["<number>", "'d'", "<function>", "'('"]),
        }
    }

    // list := sum ',' sum | list ',' sum
    //
    // Function calls take at least two parameters; the first comma is
    // mandatory.
    fn parse_list(&mut self) -> PResult<NonEmpty<Node>> {
        let first = self.parse_sum()?;
        self.consume(TokenKind::Comma)?;
        let mut params = NonEmpty::new(first);
        params.push(self.parse_sum()?);
        while self.matches(TokenKind::Comma) {
            self.lexer.next();
            params.push(self.parse_sum()?);
        }
        Ok(params)
    }
}

fn expected_list(expected: &[&str]) -> NonEmpty<String> {
    NonEmpty::try_from_vec(expected.iter().map(|&s| s.to_owned()).collect())
        .expect("expected token list is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PResult<Expression> {
        Parser::new(s).parse()
    }

    fn check(s: &str, expected: Node) {
        let parsed = parse(s).unwrap();
        assert_eq!(&expected, parsed.root());
    }

    fn check_err(s: &str) -> ParseError {
        parse(s).unwrap_err()
    }

    #[test]
    fn test_parse_literal() {
        check("32", Node::literal(32));
        check("0", Node::literal(0));
        check(" 7 ", Node::literal(7));
    }

    #[test]
    fn test_parse_dice() {
        check("3d6", Node::rolls(3, 6));
        check("d20", Node::rolls(1, 20));
        check("d100", Node::rolls(1, 100));
        check("0d6", Node::rolls(0, 6));
    }

    #[test]
    fn test_parse_mult() {
        check("2x3", Node::mult(2, Node::literal(3)));
        check("2x3d4", Node::mult(2, Node::rolls(3, 4)));
        check("2xd6", Node::mult(2, Node::rolls(1, 6)));
        check(
            "2x(d4+d6)",
            Node::mult(2, Node::add(Node::rolls(1, 4), Node::rolls(1, 6))),
        );
    }

    #[test]
    fn test_parse_add() {
        check("1+2", Node::add(Node::literal(1), Node::literal(2)));
        check("3d6 + 1", Node::add(Node::rolls(3, 6), Node::literal(1)));
        check(
            "2x3d4+d8",
            Node::add(Node::mult(2, Node::rolls(3, 4)), Node::rolls(1, 8)),
        );
    }

    #[test]
    fn test_parse_functions() {
        check(
            "min(3,5)",
            Node::func(
                Func::Min,
                vec1![Node::literal(3), Node::literal(5)],
            ),
        );
        check(
            "MAX(d4, d6, d8)",
            Node::func(
                Func::Max,
                vec1![Node::rolls(1, 4), Node::rolls(1, 6), Node::rolls(1, 8)],
            ),
        );
        check(
            "min(3d6,d20)+1",
            Node::add(
                Node::func(Func::Min, vec1![Node::rolls(3, 6), Node::rolls(1, 20)]),
                Node::literal(1),
            ),
        );
        check(
            "mean(1+2, 2x(d4))",
            Node::func(
                Func::Mean,
                vec1![
                    Node::add(Node::literal(1), Node::literal(2)),
                    Node::mult(2, Node::rolls(1, 4)),
                ],
            ),
        );
    }

    #[test]
    fn test_parens_group_sums() {
        // Parentheses return the inner node without wrapping it.
        check("(3d6)", Node::rolls(3, 6));
        check(
            "(1+2)+3",
            Node::add(
                Node::add(Node::literal(1), Node::literal(2)),
                Node::literal(3),
            ),
        );
    }

    #[test]
    fn test_single_addition_only() {
        let err = check_err("1+2+3");
        assert!(!err.is_lex_error());
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert!(matches!(
            check_err("(1+2+3)"),
            ParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_single_repetition_only() {
        assert!(matches!(
            check_err("2x3x4"),
            ParseError::UnexpectedToken { .. }
        ));
        // Nested repetition is fine once parenthesized.
        check(
            "2x(3x4)",
            Node::mult(2, Node::mult(3, Node::literal(4))),
        );
    }

    #[test]
    fn test_function_arity() {
        assert!(matches!(
            check_err("min(3)"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(check_err("max()"), ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(
            check_err("3d6 7"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            check_err("3d6)"),
            ParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_unexpected_end() {
        assert!(matches!(check_err("3d"), ParseError::UnexpectedEnd { .. }));
        assert!(matches!(check_err("2x"), ParseError::UnexpectedEnd { .. }));
        assert!(matches!(
            check_err("min(3,5"),
            ParseError::UnexpectedEnd { .. }
        ));
    }

    #[test]
    fn test_illegal_character() {
        let err = check_err("2 % 3");
        assert!(err.is_lex_error());
        match err {
            ParseError::IllegalCharacter(pos) => assert_eq!("%", pos.slice),
            other => panic!("expected IllegalCharacter, got {:?}", other),
        }
        // Uppercase D and X are reserved but match no rule.
        assert!(matches!(
            check_err("D4"),
            ParseError::IllegalCharacter(_)
        ));
    }

    #[test]
    fn test_invalid_function_name() {
        let err = check_err("foo(1,2)");
        assert!(err.is_lex_error());
        match err {
            ParseError::InvalidFunction { name, .. } => assert_eq!("FOO", name),
            other => panic!("expected InvalidFunction, got {:?}", other),
        }
        // `dice` lexes as the die operator followed by the run `ice`.
        match check_err("dice") {
            ParseError::InvalidFunction { name, .. } => assert_eq!("ICE", name),
            other => panic!("expected InvalidFunction, got {:?}", other),
        }
    }

    #[test]
    fn test_number_too_large() {
        assert!(matches!(
            check_err("99999999999999999999"),
            ParseError::NumberTooLarge(_)
        ));
    }

    #[test]
    fn test_depth_guard() {
        let mut s = "(".repeat(200);
        s.push('1');
        s.push_str(&")".repeat(200));
        assert!(matches!(check_err(&s), ParseError::TooDeep(_)));

        // Moderate nesting still parses.
        let mut s = "(".repeat(40);
        s.push('1');
        s.push_str(&")".repeat(40));
        check(&s, Node::literal(1));
    }
}
