use alloc::vec::Vec;

use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, types::InfMsgMask, UbxPacketDecode, UbxPacketMeta},
};

/// Information message configuration
pub struct CfgInf;

impl UbxPacketMeta for CfgInf {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x02;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const NAME: &'static str = "CFG-INF";
}

const BLOCK_LEN: usize = 10;

/// Enabled INF messages of one protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InfoProtocolConfig {
    /// 0 = UBX, 1 = NMEA
    pub protocol_id: u8,
    /// One mask per I/O target, same order as the CFG-MSG rates
    pub masks: [InfMsgMask; 6],
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InfoConfig {
    pub protocols: Vec<InfoProtocolConfig>,
}

impl UbxPacketDecode for CfgInf {
    type Record = InfoConfig;

    fn decode(payload: &[u8]) -> Result<InfoConfig, DecodeError> {
        if payload.len() % BLOCK_LEN != 0 {
            let count = payload.len() / BLOCK_LEN;
            return Err(DecodeError::GroupSizeMismatch {
                packet: Self::NAME,
                count,
                expect: count * BLOCK_LEN,
                got: payload.len(),
            });
        }
        let mut r = PayloadReader::new(Self::NAME, payload);
        let mut protocols = Vec::with_capacity(payload.len() / BLOCK_LEN);
        while r.remaining() > 0 {
            let protocol_id = r.u8()?;
            r.skip(3)?;
            let mut masks = [InfMsgMask::empty(); 6];
            for mask in masks.iter_mut() {
                *mask = InfMsgMask::from_bits_retain(r.u8()?);
            }
            protocols.push(InfoProtocolConfig { protocol_id, masks });
        }
        Ok(InfoConfig { protocols })
    }
}
