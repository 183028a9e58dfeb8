use derive_more::{Deref, From, Into};
use std::ops::{BitOr, BitOrAssign};

/// Presentation hints attached to every option. The codec carries them verbatim,
/// including bits it has no name for; renderers decide what they mean.
#[derive(From, Into, Deref, PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct OptionFlags(u32);

const FLAG_NAMES: [(OptionFlags, &str); 4] = [
    (OptionFlags::READONLY, "read-only"),
    (OptionFlags::GRAYOUT, "grayed out"),
    (OptionFlags::SUPPRESS, "suppressed"),
    (OptionFlags::VOLATILE, "volatile"),
];

impl OptionFlags {
    pub const NONE: Self = Self(0);
    pub const READONLY: Self = Self(1 << 0);
    pub const GRAYOUT: Self = Self(1 << 1);
    pub const SUPPRESS: Self = Self(1 << 2);
    pub const VOLATILE: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the set, known flags, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        FLAG_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for OptionFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl BitOrAssign for OptionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
