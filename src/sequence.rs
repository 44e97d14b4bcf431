/// Largest 802.11 sequence number.
pub const SEQUENCE_MAX: u16 = 0x0fff;

/// 12-bit sequence number generator shared by both spoofed directions.
///
/// Starts at 0, yields 1 on the first call, and restarts from 1 once 4095
/// has been handed out.
#[derive(Debug, Default, Clone)]
pub struct SequenceCounter {
    counter: u16,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw number handed out by the previous call, 0 before the first one.
    pub fn current(&self) -> u16 {
        self.counter
    }

    /// Advances the counter and returns the packed sequence control value.
    ///
    /// Call once per transmitted frame.
    pub fn next_sequence_control(&mut self) -> u16 {
        if self.counter >= SEQUENCE_MAX {
            self.counter = 0;
        }
        self.counter += 1;
        pack_sequence_control(self.counter)
    }
}

/// Sequence number in the upper 12 bits, fragment number 0.
pub fn pack_sequence_control(sequence: u16) -> u16 {
    (sequence & SEQUENCE_MAX) << 4
}

/// Inverse of [`pack_sequence_control`].
pub fn sequence_number(sequence_control: u16) -> u16 {
    sequence_control >> 4
}
