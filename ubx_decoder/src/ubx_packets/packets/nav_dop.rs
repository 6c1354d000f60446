use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, UbxPacketDecode, UbxPacketMeta},
};

/// Dilution of precision
pub struct NavDop;

impl UbxPacketMeta for NavDop {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x04;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(18);
    const NAME: &'static str = "NAV-DOP";
}

/// All DOP values are dimensionless, scaled from units of 0.01
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DilutionOfPrecision {
    pub itow: u32,
    pub geometric: f32,
    pub position: f32,
    pub time: f32,
    pub vertical: f32,
    pub horizontal: f32,
    pub northing: f32,
    pub easting: f32,
}

fn dop(raw: u16) -> f32 {
    f32::from(raw) * 1e-2
}

impl UbxPacketDecode for NavDop {
    type Record = DilutionOfPrecision;

    fn decode(payload: &[u8]) -> Result<DilutionOfPrecision, DecodeError> {
        let mut r = PayloadReader::for_packet::<Self>(payload)?;
        Ok(DilutionOfPrecision {
            itow: r.u32()?,
            geometric: dop(r.u16()?),
            position: dop(r.u16()?),
            time: dop(r.u16()?),
            vertical: dop(r.u16()?),
            horizontal: dop(r.u16()?),
            northing: dop(r.u16()?),
            easting: dop(r.u16()?),
        })
    }
}
