use core::fmt;
use core::num::NonZeroI32;

/// 1-based variable index.
pub type Variable = usize;

/// A signed reference to a boolean variable.
///
/// The absolute value is the variable, the sign its required polarity: a
/// positive literal is satisfied when the variable is true, a negative one
/// when it is false. Zero is not a literal, which `NonZeroI32` enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Builds a literal for `var` with the given polarity.
    ///
    /// Returns `None` for variable `0` or a variable beyond `i32::MAX`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Option<Self> {
        let magnitude = i32::try_from(var).ok()?;
        let value = if polarity { magnitude } else { -magnitude };
        Self::from_i32(value)
    }

    /// Interprets a signed integer as a literal.
    ///
    /// `0` is rejected, and so is `i32::MIN`, whose variable has no positive
    /// counterpart in `i32`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == i32::MIN {
            return None;
        }
        match NonZeroI32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The signed integer form, as written in a clause file.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }

    /// The 1-based variable this literal refers to.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs().get() as Variable
    }

    /// Position of the variable inside a partial assignment.
    #[must_use]
    pub const fn index(self) -> usize {
        self.variable() - 1
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    /// Whether the literal holds when its variable takes `value`.
    #[must_use]
    pub const fn is_satisfied_by(self, value: bool) -> bool {
        value == self.polarity()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
