use crate::chess::{Color, Outcome};
use crate::notation::MoveToken;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, mem::take, str::FromStr};

/// One full turn of a game: white's move and, unless the game ended, black's reply.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct MovePair {
    /// The move number, counting from `1`.
    pub number: u32,
    pub white: Option<String>,
    pub black: Option<String>,
    /// Free text annotations that follow the moves.
    pub comments: Vec<String>,
}

impl MovePair {
    /// A pair with both moves.
    pub fn new(number: u32, white: &str, black: &str) -> Self {
        MovePair {
            number,
            white: Some(white.into()),
            black: Some(black.into()),
            comments: Vec::new(),
        }
    }

    /// The moves of this pair, white's first.
    pub fn tokens(&self) -> impl Iterator<Item = MoveToken<'_>> {
        [(Color::White, &self.white), (Color::Black, &self.black)]
            .into_iter()
            .filter_map(move |(turn, san)| Some(MoveToken::new(self.number, turn, san.as_deref()?)))
    }
}

impl fmt::Display for MovePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.white, &self.black) {
            (Some(w), Some(b)) => write!(f, "{}. {} {}", self.number, w, b),
            (Some(w), None) => write!(f, "{}. {}", self.number, w),
            (None, Some(b)) => write!(f, "{}... {}", self.number, b),
            (None, None) => write!(f, "{}.", self.number),
        }
    }
}

/// A game record in [Portable Game Notation].
///
/// [Portable Game Notation]: https://www.chessprogramming.org/Portable_Game_Notation
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Pgn {
    /// The tag pairs, e.g. `[White "Morphy"]`, in order.
    pub tags: Vec<(String, String)>,
    /// The main line, variations excluded.
    pub pairs: Vec<MovePair>,
    /// Annotations that precede the first move.
    pub comments: Vec<String>,
    /// The result marker, if the movetext is terminated by one.
    pub outcome: Option<Outcome>,
}

/// The reason why parsing [`Pgn`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParsePgnError {
    #[display(fmt = "unterminated tag pair")]
    UnterminatedTag,
    #[display(fmt = "malformed tag pair `{}`", _0)]
    InvalidTag(#[error(not(source))] String),
    #[display(fmt = "unterminated comment")]
    UnterminatedComment,
    #[display(fmt = "unbalanced variation")]
    UnbalancedVariation,
    #[display(fmt = "invalid move number `{}`", _0)]
    InvalidMoveNumber(#[error(not(source))] String),
    #[display(fmt = "expected one game, found {}", _0)]
    MultipleGames(#[error(not(source))] usize),
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token<'a> {
    Tag(String, String),
    Comment(&'a str),
    Open,
    Close,
    Nag,
    Number(u32, bool),
    San(&'a str),
    Result(Outcome),
}

/// The position of the `]` that closes a tag pair, skipping over the quoted value.
fn tag_end(s: &str) -> Option<usize> {
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ']' if !quoted => return Some(i),
            _ => {}
        }
    }

    None
}

fn tag(inner: &str) -> Result<Token<'_>, ParsePgnError> {
    let invalid = || ParsePgnError::InvalidTag(inner.trim().into());

    let (name, value) = inner.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(invalid)?;

    let value = value.replace("\\\"", "\"").replace("\\\\", "\\");
    Ok(Token::Tag(name.into(), value))
}

fn word<'a>(w: &'a str, tokens: &mut Vec<Token<'a>>) -> Result<(), ParsePgnError> {
    if let Ok(o) = w.parse() {
        tokens.push(Token::Result(o));
        return Ok(());
    } else if w.starts_with('$') {
        tokens.push(Token::Nag);
        return Ok(());
    }

    let digits = w.find(|c: char| !c.is_ascii_digit()).unwrap_or(w.len());
    let (number, rest) = w.split_at(digits);
    let san = rest.trim_start_matches('.');
    let dots = rest.len() - san.len();

    let san = if digits > 0 && (dots > 0 || rest.is_empty()) {
        let n = number
            .parse()
            .map_err(|_| ParsePgnError::InvalidMoveNumber(w.into()))?;

        tokens.push(Token::Number(n, dots >= 3));
        san
    } else {
        w
    };

    let san = san.trim_end_matches(['!', '?']);
    if !san.is_empty() {
        tokens.push(Token::San(san));
    }

    Ok(())
}

fn lex(text: &str) -> Result<Vec<Token<'_>>, ParsePgnError> {
    let mut tokens = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        let c = match rest.chars().next() {
            None => break Ok(tokens),
            Some(c) => c,
        };

        match c {
            '[' => {
                let end = tag_end(rest).ok_or(ParsePgnError::UnterminatedTag)?;
                tokens.push(tag(&rest[1..end])?);
                rest = &rest[end + 1..];
            }

            '{' => {
                let end = rest.find('}').ok_or(ParsePgnError::UnterminatedComment)?;
                tokens.push(Token::Comment(rest[1..end].trim()));
                rest = &rest[end + 1..];
            }

            ';' => {
                let end = rest.find('\n').unwrap_or(rest.len());
                tokens.push(Token::Comment(rest[1..end].trim()));
                rest = &rest[end..];
            }

            '(' | ')' => {
                tokens.push(if c == '(' { Token::Open } else { Token::Close });
                rest = &rest[1..];
            }

            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || "[]{}();".contains(c))
                    .unwrap_or(rest.len());

                word(&rest[..end], &mut tokens)?;
                rest = &rest[end..];
            }
        }
    }
}

impl Pgn {
    /// Parses every game in a text that holds several of them.
    ///
    /// A game ends at its result marker, or where the tag pairs of the next game begin.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, ParsePgnError> {
        let mut games = Vec::new();
        let mut game = Pgn::default();
        let mut number = None;
        let mut depth = 0usize;

        for token in lex(text)? {
            match token {
                Token::Open => depth += 1,
                Token::Close => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(ParsePgnError::UnbalancedVariation)?
                }

                _ if depth > 0 => {}
                Token::Nag => {}

                Token::Tag(name, value) => {
                    if !game.pairs.is_empty() {
                        games.push(take(&mut game));
                        number = None;
                    }

                    game.tags.push((name, value));
                }

                Token::Comment(c) => match game.pairs.last_mut() {
                    Some(p) => p.comments.push(c.into()),
                    None => game.comments.push(c.into()),
                },

                Token::Number(n, continuation) => number = Some((n, continuation)),
                Token::San(san) => game.push(number.take(), san),

                Token::Result(o) => {
                    game.outcome = Some(o);
                    games.push(take(&mut game));
                    number = None;
                }
            }
        }

        if depth > 0 {
            return Err(ParsePgnError::UnbalancedVariation);
        } else if !game.tags.is_empty() || !game.pairs.is_empty() {
            games.push(game);
        }

        Ok(games)
    }

    /// The value of a tag, e.g. `"White"`.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn push(&mut self, number: Option<(u32, bool)>, san: &str) {
        let san = Some(san.to_string());
        let last = self
            .pairs
            .last()
            .map(|p| (p.number, p.white.is_some(), p.black.is_none()));

        match (number, last) {
            (Some((n, true)), Some((m, _, true))) if n == m => self.reply(san),
            (None, Some((_, true, true))) => self.reply(san),

            (Some((n, true)), _) => self.pairs.push(MovePair {
                number: n,
                black: san,
                ..MovePair::default()
            }),

            (Some((_, false)), _) | (None, _) => self.pairs.push(MovePair {
                number: number.map_or(0, |(n, _)| n),
                white: san,
                ..MovePair::default()
            }),
        }
    }

    fn reply(&mut self, san: Option<String>) {
        if let Some(p) = self.pairs.last_mut() {
            p.black = san;
        }
    }
}

/// Parses a single game.
impl FromStr for Pgn {
    type Err = ParsePgnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut games = Pgn::parse_all(s)?;
        match games.len() {
            0 => Ok(Pgn::default()),
            1 => Ok(games.remove(0)),
            n => Err(ParsePgnError::MultipleGames(n)),
        }
    }
}
