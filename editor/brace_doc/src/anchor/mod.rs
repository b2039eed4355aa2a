//! Elastic positions.
//!
//! An [`Anchor`] is an index into a generation-stamped arena owned by the
//! document. The arena rebases every live offset on each edit. Releasing an
//! anchor bumps its slot's generation, so a released handle can never read
//! the offset of whatever reuses the slot later.

/// Which side of an insertion at exactly its offset an anchor ends up on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bias {
    /// Stays before text inserted at its offset.
    #[default]
    Left,
    /// Moves after text inserted at its offset.
    Right,
}

/// Handle to an elastic position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Anchor {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    /// `None` for a free slot.
    position: Option<(u32, Bias)>,
}

/// Arena of elastic positions.
#[derive(Clone, Debug, Default)]
pub struct AnchorArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl AnchorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live anchors.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create(&mut self, offset: u32, bias: Bias) -> Anchor {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.position = Some((offset, bias));
            return Anchor {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            position: Some((offset, bias)),
        });
        Anchor {
            index,
            generation: 0,
        }
    }

    /// Current offset of `anchor`, or `None` once it is released.
    pub fn get(&self, anchor: Anchor) -> Option<u32> {
        self.live(anchor)?.position.map(|(offset, _)| offset)
    }

    /// Move a live anchor to `offset`, keeping its bias.
    pub fn set(&mut self, anchor: Anchor, offset: u32) -> bool {
        match self.slots.get_mut(anchor.index as usize) {
            Some(Slot {
                generation,
                position: Some((pos, _)),
            }) if *generation == anchor.generation => {
                *pos = offset;
                true
            }
            _ => false,
        }
    }

    /// Release `anchor`. Returns `false` if it was already released.
    pub fn release(&mut self, anchor: Anchor) -> bool {
        let Some(slot) = self.slots.get_mut(anchor.index as usize) else {
            return false;
        };
        if slot.generation != anchor.generation || slot.position.is_none() {
            return false;
        }
        slot.position = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(anchor.index);
        true
    }

    /// Rebase every live anchor over an edit.
    pub fn apply_edit(&mut self, offset: u32, removed_len: u32, inserted_len: u32) {
        for slot in &mut self.slots {
            if let Some((pos, bias)) = slot.position.as_mut() {
                *pos = map_offset(*pos, *bias, offset, removed_len, inserted_len);
            }
        }
    }

    fn live(&self, anchor: Anchor) -> Option<&Slot> {
        self.slots
            .get(anchor.index as usize)
            .filter(|slot| slot.generation == anchor.generation)
    }
}

/// Where `pos` lands after `removed_len` bytes at `offset` are replaced by
/// `inserted_len` bytes.
///
/// Positions inside the removed range collapse onto the edit point; `bias`
/// then decides between the start and the end of the inserted text.
pub fn map_offset(pos: u32, bias: Bias, offset: u32, removed_len: u32, inserted_len: u32) -> u32 {
    let old_end = offset + removed_len;
    if pos < offset {
        pos
    } else if pos > old_end || (pos == old_end && removed_len > 0) {
        pos - removed_len + inserted_len
    } else {
        match bias {
            Bias::Left => offset,
            Bias::Right => offset + inserted_len,
        }
    }
}
