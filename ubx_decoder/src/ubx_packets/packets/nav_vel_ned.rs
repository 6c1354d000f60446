use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, UbxPacketDecode, UbxPacketMeta},
};

/// Velocity Solution in NED
pub struct NavVelNed;

impl UbxPacketMeta for NavVelNed {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x12;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(36);
    const NAME: &'static str = "NAV-VELNED";
}

/// Velocities in m/s, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VelocityNed {
    pub itow: u32,
    pub vel_north: f64,
    pub vel_east: f64,
    pub vel_down: f64,
    /// Speed (3-D)
    pub speed: f64,
    /// Ground speed (2-D)
    pub ground_speed: f64,
    /// Heading of motion 2-D
    pub heading: f64,
    pub speed_accuracy: f64,
    pub course_accuracy: f64,
}

fn cm_per_s(raw: i32) -> f64 {
    f64::from(raw) * 1e-2
}

impl UbxPacketDecode for NavVelNed {
    type Record = VelocityNed;

    fn decode(payload: &[u8]) -> Result<VelocityNed, DecodeError> {
        let mut r = PayloadReader::for_packet::<Self>(payload)?;
        Ok(VelocityNed {
            itow: r.u32()?,
            vel_north: cm_per_s(r.i32()?),
            vel_east: cm_per_s(r.i32()?),
            vel_down: cm_per_s(r.i32()?),
            speed: f64::from(r.u32()?) * 1e-2,
            ground_speed: f64::from(r.u32()?) * 1e-2,
            heading: f64::from(r.i32()?) * 1e-5,
            speed_accuracy: f64::from(r.u32()?) * 1e-2,
            course_accuracy: f64::from(r.u32()?) * 1e-5,
        })
    }
}
