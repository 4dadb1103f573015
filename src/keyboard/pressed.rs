use std::collections::BTreeSet;

use crate::pitch::Pitch;

/// Pitches currently held down, with a revision counter for redraws.
///
/// Every mutation that changes the set bumps `revision`; a renderer that
/// remembers the last revision it drew knows when it is stale.
#[derive(Debug, Clone, Default)]
pub struct PressedSet {
    pitches: BTreeSet<Pitch>,
    revision: u64,
}

impl PressedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pitch: Pitch) -> bool {
        let changed = self.pitches.insert(pitch);
        self.touch(changed);
        changed
    }

    pub fn remove(&mut self, pitch: Pitch) -> bool {
        let changed = self.pitches.remove(&pitch);
        self.touch(changed);
        changed
    }

    /// Make `pitch` the only member.
    pub fn replace(&mut self, pitch: Pitch) {
        let changed = self.pitches.len() != 1 || !self.pitches.contains(&pitch);
        if changed {
            self.pitches.clear();
            self.pitches.insert(pitch);
        }
        self.touch(changed);
    }

    /// Empty the set, returning what was in it (ascending).
    pub fn take_all(&mut self) -> Vec<Pitch> {
        let taken: Vec<Pitch> = std::mem::take(&mut self.pitches).into_iter().collect();
        self.touch(!taken.is_empty());
        taken
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.pitches.contains(&pitch)
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pitch> + '_ {
        self.pitches.iter().copied()
    }

    /// A copy to paint one frame from.
    pub fn snapshot(&self) -> BTreeSet<Pitch> {
        self.pitches.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self, changed: bool) {
        if changed {
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{C4, E4, G4};

    #[test]
    fn revision_moves_only_on_change() {
        let mut pressed = PressedSet::new();
        assert_eq!(pressed.revision(), 0);

        pressed.insert(C4);
        assert_eq!(pressed.revision(), 1);
        pressed.insert(C4);
        assert_eq!(pressed.revision(), 1);

        pressed.replace(C4);
        assert_eq!(pressed.revision(), 1);
        pressed.replace(E4);
        assert_eq!(pressed.revision(), 2);

        pressed.remove(G4);
        assert_eq!(pressed.revision(), 2);
    }

    #[test]
    fn replace_leaves_single_pitch() {
        let mut pressed = PressedSet::new();
        pressed.insert(C4);
        pressed.insert(E4);
        pressed.replace(G4);
        assert_eq!(pressed.iter().collect::<Vec<_>>(), vec![G4]);
    }

    #[test]
    fn take_all_empties_in_order() {
        let mut pressed = PressedSet::new();
        pressed.insert(G4);
        pressed.insert(C4);
        assert_eq!(pressed.take_all(), vec![C4, G4]);
        assert!(pressed.is_empty());
        let revision = pressed.revision();
        assert!(pressed.take_all().is_empty());
        assert_eq!(pressed.revision(), revision);
    }
}
