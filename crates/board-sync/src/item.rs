use std::fmt::Debug;
use std::hash::Hash;

/// A record that can sit on a board.
///
/// The board only looks at the id and the status; everything else on the
/// record is carried along untouched.
pub trait BoardItem: Clone {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    /// Raw status value as stored on the remote
    fn status(&self) -> &str;

    fn set_status(&mut self, status: &str);
}
