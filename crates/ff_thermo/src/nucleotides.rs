use std::fmt;

use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter};

/// Table index alphabet. `Other` is the sentinel for open, terminal or
/// unknown positions and always sits at index 4.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, EnumCount, EnumIter)]
pub enum Nucleotide { A, C, G, U, Other }

/// 5 Nucleotide variants for tables.
pub const NCOUNT: usize = Nucleotide::COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported nucleotide symbol: '{}'", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

impl TryFrom<char> for Nucleotide {
    type Error = InvalidSymbol;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_uppercase() {
            'A' => Nucleotide::A,
            'C' => Nucleotide::C,
            'G' => Nucleotide::G,
            'U' | 'T' => Nucleotide::U,
            'A'..='Z' => Nucleotide::Other,
            _ => return Err(InvalidSymbol(c)),
        })
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::U => 'U',
            Nucleotide::Other => 'N',
        };
        write!(f, "{}", c)
    }
}

impl Nucleotide {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_sentinel(self) -> bool {
        self == Nucleotide::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackNotationError {
    /// Not of the form `ik/jl`.
    Shape(String),
    Symbol(InvalidSymbol),
}

impl fmt::Display for StackNotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackNotationError::Shape(s) => {
                write!(f, "Expected a stack of the form 'ik/jl', got '{}'", s)
            }
            StackNotationError::Symbol(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StackNotationError {}

impl From<InvalidSymbol> for StackNotationError {
    fn from(e: InvalidSymbol) -> Self {
        StackNotationError::Symbol(e)
    }
}

/// Two adjacent base pairs `i·j` and `k·l`, written `5'-ik-3'/3'-jl-5'`.
///
/// `i` and `k` are consecutive on one strand, `j` and `l` are their
/// partners on the other strand. The stack `AC/UG` is therefore `(A, U, C, G)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stack {
    pub i: Nucleotide,
    pub j: Nucleotide,
    pub k: Nucleotide,
    pub l: Nucleotide,
}

impl Stack {
    pub fn new(i: Nucleotide, j: Nucleotide, k: Nucleotide, l: Nucleotide) -> Self {
        Stack { i, j, k, l }
    }

    pub fn has_sentinel(&self) -> bool {
        [self.i, self.j, self.k, self.l].iter().any(|n| n.is_sentinel())
    }

    pub(crate) fn indices(&self) -> (usize, usize, usize, usize) {
        (self.i.index(), self.j.index(), self.k.index(), self.l.index())
    }
}

impl TryFrom<&str> for Stack {
    type Error = StackNotationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let shape = || StackNotationError::Shape(s.to_string());
        let (top, bottom) = s.split_once('/').ok_or_else(shape)?;

        let top: Vec<char> = top.chars().collect();
        let bottom: Vec<char> = bottom.chars().collect();
        if top.len() != 2 || bottom.len() != 2 {
            return Err(shape());
        }

        Ok(Stack {
            i: Nucleotide::try_from(top[0])?,
            k: Nucleotide::try_from(top[1])?,
            j: Nucleotide::try_from(bottom[0])?,
            l: Nucleotide::try_from(bottom[1])?,
        })
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}{}", self.i, self.k, self.j, self.l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use Nucleotide::*;

    #[test]
    fn test_fixed_index_order() {
        let order: Vec<usize> = Nucleotide::iter().map(|n| n.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(A.index(), 0);
        assert_eq!(U.index(), 3);
        assert_eq!(Other.index(), 4);
        assert_eq!(NCOUNT, 5);
    }

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(Nucleotide::try_from('a'), Ok(A));
        assert_eq!(Nucleotide::try_from('T'), Ok(U));
        assert_eq!(Nucleotide::try_from('N'), Ok(Other));
        assert_eq!(Nucleotide::try_from('x'), Ok(Other));
        assert_eq!(Nucleotide::try_from('-'), Err(InvalidSymbol('-')));
        assert_eq!(Nucleotide::try_from('3'), Err(InvalidSymbol('3')));
    }

    #[test]
    fn test_stack_notation() {
        let s = Stack::try_from("AC/UG").unwrap();
        assert_eq!(s, Stack::new(A, U, C, G));
        assert_eq!(s.indices(), (0, 3, 1, 2));
        assert_eq!(format!("{}", s), "AC/UG");
        assert!(!s.has_sentinel());

        let s = Stack::try_from("nA/UU").unwrap();
        assert_eq!(s, Stack::new(Other, U, A, U));
        assert!(s.has_sentinel());
        assert_eq!(format!("{}", s), "NA/UU");
    }

    #[test]
    fn test_stack_notation_errors() {
        assert!(matches!(Stack::try_from("ACUG"), Err(StackNotationError::Shape(_))));
        assert!(matches!(Stack::try_from("ACG/UG"), Err(StackNotationError::Shape(_))));
        assert!(matches!(Stack::try_from("A/U"), Err(StackNotationError::Shape(_))));
        assert_eq!(
            Stack::try_from("A-/UG"),
            Err(StackNotationError::Symbol(InvalidSymbol('-')))
        );
    }
}
