/// Latest-wins guard for in-flight fetches.
///
/// Every request takes a ticket; a completion is only applied when its ticket
/// is still the newest one issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuerySlot {
    generation: u64,
}

impl QuerySlot {
    pub fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }
}
