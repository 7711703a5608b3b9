mod with_this_mut;
pub(crate) use self::with_this_mut::*;
