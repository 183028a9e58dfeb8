use derive_more::{Deref, Display, From, Into};

/// Correlates an option with its rendered control. 0 means "unset": a valid tree never uses it.
#[derive(From, Into, Deref, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const UNSET: Self = Self(0);
}

/// Hands out object IDs to whoever builds a menu. Starts at 1.
#[derive(Default, Debug)]
pub struct ObjectIdGenerator {
    last: u32,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ObjectId {
        self.last += 1;
        ObjectId(self.last)
    }
}
