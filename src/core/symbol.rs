//! Display symbols and their assignment to sides.

use serde::{Deserialize, Serialize};

use super::board::Side;

/// A display symbol. Which side draws which symbol is a player setting,
/// tracked by [`SymbolAssignment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The other symbol.
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Character form for rendering.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Which symbol each side draws. Only the human's pick is stored; the
/// computer always takes the complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolAssignment {
    human: Symbol,
}

impl SymbolAssignment {
    /// Assign `human` to the human side, the complement to the computer.
    #[must_use]
    pub const fn new(human: Symbol) -> Self {
        Self { human }
    }

    /// The human's symbol.
    #[must_use]
    pub const fn human(self) -> Symbol {
        self.human
    }

    /// The computer's symbol.
    #[must_use]
    pub const fn computer(self) -> Symbol {
        self.human.complement()
    }

    /// Symbol drawn by `side`.
    #[must_use]
    pub const fn for_side(self, side: Side) -> Symbol {
        match side {
            Side::Human => self.human(),
            Side::Computer => self.computer(),
        }
    }
}

impl Default for SymbolAssignment {
    /// The human plays X unless told otherwise.
    fn default() -> Self {
        Self::new(Symbol::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        assert_eq!(Symbol::X.complement(), Symbol::O);
        assert_eq!(Symbol::O.complement(), Symbol::X);
    }

    #[test]
    fn test_assignment_pairs() {
        let assignment = SymbolAssignment::new(Symbol::O);
        assert_eq!(assignment.human(), Symbol::O);
        assert_eq!(assignment.computer(), Symbol::X);
        assert_eq!(assignment.for_side(Side::Human), Symbol::O);
        assert_eq!(assignment.for_side(Side::Computer), Symbol::X);
    }

    #[test]
    fn test_default_is_x() {
        assert_eq!(SymbolAssignment::default().human(), Symbol::X);
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::X.to_string(), "X");
        assert_eq!(Symbol::O.to_string(), "O");
    }
}
