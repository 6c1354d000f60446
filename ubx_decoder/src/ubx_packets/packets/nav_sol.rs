use crate::{
    error::DecodeError,
    ubx_packets::{
        reader::PayloadReader,
        types::{GpsFix, NavStatusFlags},
        UbxPacketDecode, UbxPacketMeta,
    },
};

/// Navigation Solution Information
pub struct NavSol;

impl UbxPacketMeta for NavSol {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x06;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(52);
    const NAME: &'static str = "NAV-SOL";
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavSolution {
    /// GPS Millisecond Time of Week
    pub itow: u32,
    /// Fractional part of iTOW in ns (range ±500000)
    pub ftow: i32,
    /// GPS week number of the navigation epoch
    pub week: i16,
    pub fix_type: GpsFix,
    pub flags: NavStatusFlags,
    /// ECEF position in meters
    pub ecef_x: f64,
    pub ecef_y: f64,
    pub ecef_z: f64,
    /// 3D Position Accuracy Estimate in meters
    pub position_accuracy: f64,
    /// ECEF velocity in m/s
    pub ecef_vx: f64,
    pub ecef_vy: f64,
    pub ecef_vz: f64,
    /// Speed Accuracy Estimate in m/s
    pub speed_accuracy: f64,
    pub pdop: f32,
    /// Number of SVs used in Nav Solution
    pub num_satellites: u8,
}

fn cm(raw: i32) -> f64 {
    f64::from(raw) * 1e-2
}

impl UbxPacketDecode for NavSol {
    type Record = NavSolution;

    fn decode(payload: &[u8]) -> Result<NavSolution, DecodeError> {
        let mut r = PayloadReader::for_packet::<Self>(payload)?;
        let itow = r.u32()?;
        let ftow = r.i32()?;
        let week = r.i16()?;
        let fix_type = GpsFix::from(r.u8()?);
        let flags = NavStatusFlags::from_bits_retain(r.u8()?);
        let ecef_x = cm(r.i32()?);
        let ecef_y = cm(r.i32()?);
        let ecef_z = cm(r.i32()?);
        let position_accuracy = f64::from(r.u32()?) * 1e-2;
        let ecef_vx = cm(r.i32()?);
        let ecef_vy = cm(r.i32()?);
        let ecef_vz = cm(r.i32()?);
        let speed_accuracy = f64::from(r.u32()?) * 1e-2;
        let pdop = f32::from(r.u16()?) * 1e-2;
        r.skip(1)?;
        let num_satellites = r.u8()?;
        Ok(NavSolution {
            itow,
            ftow,
            week,
            fix_type,
            flags,
            ecef_x,
            ecef_y,
            ecef_z,
            position_accuracy,
            ecef_vx,
            ecef_vy,
            ecef_vz,
            speed_accuracy,
            pdop,
            num_satellites,
        })
    }
}
