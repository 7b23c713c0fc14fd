use std::fmt;
use std::num::NonZeroU32;

pub use vec1::vec1;

/// The signed type every expression evaluates to.
pub type Int = i64;
/// The unsigned type of numeric literals, roll counts, and die sides.
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// The aggregate functions the language knows about.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Func {
    Min,
    Max,
    Mean,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("min") {
            Some(Self::Min)
        } else if name.eq_ignore_ascii_case("max") {
            Some(Self::Max)
        } else if name.eq_ignore_ascii_case("mean") {
            Some(Self::Mean)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Mean => "MEAN",
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
