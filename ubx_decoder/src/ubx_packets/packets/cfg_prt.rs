use crate::{
    error::DecodeError,
    ubx_packets::{
        reader::PayloadReader,
        types::{InProtoMask, OutProtoMask, PortId},
        UbxPacketDecode, UbxPacketMeta,
    },
};

/// Port Configuration
pub struct CfgPrt;

impl UbxPacketMeta for CfgPrt {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x00;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(20);
    const NAME: &'static str = "CFG-PRT";
}

/// Configuration of one I/O port as reported by the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortConfig {
    pub port: PortId,
    /// TX ready PIN configuration
    pub tx_ready: u16,
    /// Port specific mode bits (character framing for UARTs, slave address
    /// for I2C, SPI mode)
    pub mode: u32,
    /// Only UARTs have a baud rate; `None` for USB, SPI and I2C
    pub baud_rate: Option<u32>,
    pub in_proto_mask: InProtoMask,
    pub out_proto_mask: OutProtoMask,
    pub flags: u16,
}

impl UbxPacketDecode for CfgPrt {
    type Record = PortConfig;

    fn decode(payload: &[u8]) -> Result<PortConfig, DecodeError> {
        let mut r = PayloadReader::for_packet::<Self>(payload)?;
        let port = PortId::from(r.u8()?);
        r.skip(1)?;
        let tx_ready = r.u16()?;
        let mode = r.u32()?;
        let baud = r.u32()?;
        let in_proto_mask = InProtoMask::from_bits_retain(r.u16()?);
        let out_proto_mask = OutProtoMask::from_bits_retain(r.u16()?);
        let flags = r.u16()?;
        Ok(PortConfig {
            port,
            tx_ready,
            mode,
            baud_rate: port.is_uart().then_some(baud),
            in_proto_mask,
            out_proto_mask,
            flags,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec::Vec;

    fn payload(port: u8, baud: u32) -> Vec<u8> {
        let mut p = Vec::new();
        p.push(port);
        p.push(0);
        p.extend_from_slice(&0u16.to_le_bytes());
        p.extend_from_slice(&0x08d0u32.to_le_bytes());
        p.extend_from_slice(&baud.to_le_bytes());
        p.extend_from_slice(&0x0007u16.to_le_bytes());
        p.extend_from_slice(&0x0003u16.to_le_bytes());
        p.extend_from_slice(&0u16.to_le_bytes());
        p.extend_from_slice(&[0, 0]);
        p
    }

    #[test]
    fn uart_reports_baud() {
        let cfg = CfgPrt::decode(&payload(1, 115_200)).unwrap();
        assert_eq!(cfg.port, PortId::Uart1);
        assert_eq!(cfg.baud_rate, Some(115_200));
        assert_eq!(cfg.mode, 0x08d0);
        assert!(cfg
            .in_proto_mask
            .contains(InProtoMask::UBLOX | InProtoMask::NMEA | InProtoMask::RTCM));
        assert_eq!(cfg.out_proto_mask, OutProtoMask::UBLOX | OutProtoMask::NMEA);
    }

    #[test]
    fn usb_has_no_baud() {
        let cfg = CfgPrt::decode(&payload(3, 0)).unwrap();
        assert_eq!(cfg.port, PortId::Usb);
        assert_eq!(cfg.baud_rate, None);
    }

    #[test]
    fn port_poll_is_truncated() {
        assert!(matches!(
            CfgPrt::decode(&[1]),
            Err(DecodeError::TruncatedPayload {
                expect: 20,
                got: 1,
                ..
            })
        ));
    }
}
