use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};

/// A measurement in points (1/72 of an inch), the native unit of page
/// coordinates and font sizes throughout the crate.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;
    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Div<Pt> for Pt {
    type Output = f32;
    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl std::ops::Neg for Pt {
    type Output = Pt;
    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

/// A measurement in inches. Convert to [Pt] with `.into()`.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
#[display("{_0}in")]
pub struct In(pub f32);

impl From<In> for Pt {
    fn from(v: In) -> Pt {
        Pt(v.0 * 72.0)
    }
}

/// A measurement in millimetres. Convert to [Pt] with `.into()`.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(v: Mm) -> Pt {
        Pt(v.0 * 72.0 / 25.4)
    }
}
