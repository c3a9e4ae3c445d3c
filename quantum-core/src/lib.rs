use derive_more::Display;
use num_derive::{FromPrimitive, ToPrimitive};
use std::str::FromStr;

/// All elements of a given type. Usually used for simple enums.
pub trait All<const NUM_ELEMENTS: usize>: Sized {
    fn all() -> [Self; NUM_ELEMENTS];
}

/// Single-qubit measurement bases, also axes of the Bloch sphere.
///
/// The discriminants follow the letter order, so `Axis::X as usize == 0`.
/// [`All::all`] enumerates the axes in the same X, Y, Z order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Display, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, FromPrimitive, ToPrimitive)]
pub enum Axis {
    /// Pauli X, also x axis of the Bloch sphere
    /// ```text
    /// |0 1|
    /// |1 0|
    /// ```
    X = 0,

    /// Pauli Y, also y axis of the Bloch sphere
    /// ```text
    /// |0 -i|
    /// |i  0|
    /// ```
    Y = 1,

    /// Pauli Z, also z axis of the Bloch sphere
    /// ```text
    /// |1  0|
    /// |0 -1|
    /// ```
    Z = 2,
}

impl All<3> for Axis {
    fn all() -> [Axis; 3] {
        [Axis::X, Axis::Y, Axis::Z]
    }
}

impl Axis {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
pub struct AxisCharacterError;

impl std::fmt::Display for AxisCharacterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("expected one of the Pauli letters X, Y, Z")
    }
}

impl std::error::Error for AxisCharacterError {}

impl TryFrom<char> for Axis {
    type Error = AxisCharacterError;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        match character {
            'X' | 'x' => Ok(Axis::X),
            'Y' | 'y' => Ok(Axis::Y),
            'Z' | 'z' => Ok(Axis::Z),
            _ => Err(AxisCharacterError),
        }
    }
}

impl FromStr for Axis {
    type Err = AxisCharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        match (characters.next(), characters.next()) {
            (Some(character), None) => Axis::try_from(character),
            _ => Err(AxisCharacterError),
        }
    }
}

/// A Pauli axis acting on a specific qubit.
///
/// Ordered by qubit first, then by axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct PositionedAxis {
    pub qubit_id: usize,
    pub axis: Axis,
}

impl std::fmt::Display for PositionedAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.axis, subscript_digits(self.qubit_id))
    }
}

#[must_use]
pub fn x(qubit_id: usize) -> PositionedAxis {
    PositionedAxis { qubit_id, axis: Axis::X }
}

#[must_use]
pub fn y(qubit_id: usize) -> PositionedAxis {
    PositionedAxis { qubit_id, axis: Axis::Y }
}

#[must_use]
pub fn z(qubit_id: usize) -> PositionedAxis {
    PositionedAxis { qubit_id, axis: Axis::Z }
}

impl From<(usize, Axis)> for PositionedAxis {
    fn from(value: (usize, Axis)) -> Self {
        PositionedAxis {
            qubit_id: value.0,
            axis: value.1,
        }
    }
}

impl From<PositionedAxis> for (usize, Axis) {
    fn from(value: PositionedAxis) -> Self {
        (value.qubit_id, value.axis)
    }
}

impl From<(Axis, usize)> for PositionedAxis {
    fn from(value: (Axis, usize)) -> Self {
        PositionedAxis {
            qubit_id: value.1,
            axis: value.0,
        }
    }
}

impl From<PositionedAxis> for (Axis, usize) {
    fn from(value: PositionedAxis) -> Self {
        (value.axis, value.qubit_id)
    }
}

#[must_use]
pub fn subscript_digits(number: usize) -> String {
    let mut res = String::new();
    for char in number.to_string().chars() {
        let digit = char.to_digit(10).unwrap_or_default() as usize;
        res.push(SUB_CHARS[digit]);
    }
    res
}

pub const SUB_CHARS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
