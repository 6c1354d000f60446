use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, UbxPacketDecode, UbxPacketMeta},
};

/// Geodetic Position Solution
pub struct NavPosLlh;

impl UbxPacketMeta for NavPosLlh {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x02;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(28);
    const NAME: &'static str = "NAV-POSLLH";
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeodeticPosition {
    /// GPS Millisecond Time of Week
    pub itow: u32,
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Height above Ellipsoid in meters
    pub height: f64,
    /// Height above mean sea level in meters
    pub height_msl: f64,
    /// Horizontal Accuracy Estimate in meters
    pub h_acc: f64,
    /// Vertical Accuracy Estimate in meters
    pub v_acc: f64,
}

impl UbxPacketDecode for NavPosLlh {
    type Record = GeodeticPosition;

    fn decode(payload: &[u8]) -> Result<GeodeticPosition, DecodeError> {
        let mut r = PayloadReader::for_packet::<Self>(payload)?;
        Ok(GeodeticPosition {
            itow: r.u32()?,
            lon: f64::from(r.i32()?) * 1e-7,
            lat: f64::from(r.i32()?) * 1e-7,
            height: f64::from(r.i32()?) * 1e-3,
            height_msl: f64::from(r.i32()?) * 1e-3,
            h_acc: f64::from(r.u32()?) * 1e-3,
            v_acc: f64::from(r.u32()?) * 1e-3,
        })
    }
}
