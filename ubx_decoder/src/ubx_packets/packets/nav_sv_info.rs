use alloc::vec::Vec;

use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, types::SvInfoFlags, UbxPacketDecode, UbxPacketMeta},
};

/// Space Vehicle Information
pub struct NavSvInfo;

impl UbxPacketMeta for NavSvInfo {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x30;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const NAME: &'static str = "NAV-SVINFO";
}

const HEADER_LEN: usize = 8;
const CHANNEL_LEN: usize = 12;

/// One tracked channel, in the order the receiver reported it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SatelliteView {
    /// Channel number, 255 for SVs not assigned to a channel
    pub channel: u8,
    pub svid: u8,
    pub flags: SvInfoFlags,
    /// Signal quality indicator
    pub quality: u8,
    /// Carrier to noise ratio in dB-Hz
    pub cno: u8,
    /// Elevation in degrees
    pub elevation: i8,
    /// Azimuth in degrees
    pub azimuth: i16,
    /// Pseudo range residual in meters
    pub pr_res: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SatelliteInfo {
    pub itow: u32,
    /// Chip generation bits of `globalFlags`
    pub global_flags: u8,
    pub satellites: Vec<SatelliteView>,
}

impl SatelliteInfo {
    /// Satellites currently used in the navigation solution
    pub fn used(&self) -> impl Iterator<Item = &SatelliteView> {
        self.satellites
            .iter()
            .filter(|sv| sv.flags.contains(SvInfoFlags::SV_USED))
    }
}

impl UbxPacketDecode for NavSvInfo {
    type Record = SatelliteInfo;

    fn decode(payload: &[u8]) -> Result<SatelliteInfo, DecodeError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        let itow = r.u32()?;
        let count = usize::from(r.u8()?);
        let global_flags = r.u8()?;
        r.skip(2)?;

        let expect = HEADER_LEN + CHANNEL_LEN * count;
        if payload.len() != expect {
            return Err(DecodeError::GroupSizeMismatch {
                packet: Self::NAME,
                count,
                expect,
                got: payload.len(),
            });
        }

        let mut satellites = Vec::with_capacity(count);
        for _ in 0..count {
            satellites.push(SatelliteView {
                channel: r.u8()?,
                svid: r.u8()?,
                flags: SvInfoFlags::from_bits_retain(r.u8()?),
                quality: r.u8()?,
                cno: r.u8()?,
                elevation: r.i8()?,
                azimuth: r.i16()?,
                pr_res: f64::from(r.i32()?) * 1e-2,
            });
        }
        Ok(SatelliteInfo {
            itow,
            global_flags,
            satellites,
        })
    }
}
