//! Initiative dice formulas
//!
//! A formula is a signed sum of terms:
//!
//! - `NdS` dice (`d20` is one die)
//! - integer constants
//! - `@path` references resolved numerically on the rolling combatant
//!
//! e.g. `1d20 + @attributes.init.mod - 1`.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1, multispace0, one_of};
use nom::combinator::{all_consuming, map, map_res, opt};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use rand::Rng;

use crate::core::error::{GroupingError, Result};
use crate::core::types::Combatant;
use crate::grouping::path::{as_number, resolve};

/// Upper bound on dice per term, keeps a typo like `2000d6` from stalling a roll
pub const MAX_DICE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Dice { count: u32, sides: u32 },
    Constant(u32),
    Reference(String),
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Dice { count, sides } => write!(f, "{}d{}", count, sides),
            Term::Constant(value) => write!(f, "{}", value),
            Term::Reference(path) => write!(f, "@{}", path),
        }
    }
}

/// A parsed initiative formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiativeFormula {
    /// Terms with their sign (`true` when subtracted)
    terms: Vec<(bool, Term)>,
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

fn dice(input: &str) -> IResult<&str, Term> {
    map(
        pair(opt(number), preceded(one_of("dD"), number)),
        |(count, sides)| Term::Dice {
            count: count.unwrap_or(1),
            sides,
        },
    )
    .parse(input)
}

fn reference(input: &str) -> IResult<&str, Term> {
    map(
        preceded(
            char('@'),
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
        ),
        |path: &str| Term::Reference(path.to_string()),
    )
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    alt((dice, map(number, Term::Constant), reference)).parse(input)
}

fn sign(input: &str) -> IResult<&str, bool> {
    map(delimited(multispace0, one_of("+-"), multispace0), |op| {
        op == '-'
    })
    .parse(input)
}

fn formula(input: &str) -> IResult<&str, Vec<(bool, Term)>> {
    map(
        delimited(
            multispace0,
            pair(pair(opt(sign), term), many0(pair(sign, term))),
            multispace0,
        ),
        |((leading, first), rest)| {
            let mut terms = vec![(leading.unwrap_or(false), first)];
            terms.extend(rest);
            terms
        },
    )
    .parse(input)
}

impl InitiativeFormula {
    pub fn parse(text: &str) -> Result<Self> {
        let (_, terms) = all_consuming(formula)
            .parse(text)
            .map_err(|e| GroupingError::Formula(format!("'{}': {}", text, e)))?;

        for (_, term) in &terms {
            if let Term::Dice { count, sides } = term {
                if *sides == 0 || *count == 0 {
                    return Err(GroupingError::Formula(format!(
                        "'{}': dice need at least one die and one side",
                        text
                    )));
                }
                if *count > MAX_DICE {
                    return Err(GroupingError::Formula(format!(
                        "'{}': at most {} dice per term",
                        text, MAX_DICE
                    )));
                }
            }
        }

        Ok(Self { terms })
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().map(|(_, term)| term)
    }

    /// Roll the formula for one combatant
    ///
    /// References that do not resolve to a number count as zero.
    pub fn evaluate(&self, combatant: &Combatant, rng: &mut impl Rng) -> f64 {
        self.terms
            .iter()
            .map(|(negative, term)| {
                let value = match term {
                    Term::Dice { count, sides } => {
                        (0..*count).map(|_| rng.gen_range(1..=*sides) as f64).sum::<f64>()
                    }
                    Term::Constant(value) => *value as f64,
                    Term::Reference(path) => {
                        match resolve(combatant, path).as_ref().and_then(as_number) {
                            Some(value) => value,
                            None => {
                                tracing::debug!(
                                    "'@{}' has no numeric value on {}; using 0",
                                    path,
                                    combatant.id
                                );
                                0.0
                            }
                        }
                    }
                };
                if *negative {
                    -value
                } else {
                    value
                }
            })
            .sum()
    }
}

impl std::fmt::Display for InitiativeFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (negative, term)) in self.terms.iter().enumerate() {
            match (i, negative) {
                (0, false) => write!(f, "{}", term)?,
                (0, true) => write!(f, "-{}", term)?,
                (_, false) => write!(f, " + {}", term)?,
                (_, true) => write!(f, " - {}", term)?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for InitiativeFormula {
    type Err = GroupingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
