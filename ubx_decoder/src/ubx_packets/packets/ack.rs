use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, MessageIdentity, UbxPacketDecode, UbxPacketMeta},
};

/// Message Acknowledged
pub struct AckAck;

impl UbxPacketMeta for AckAck {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(2);
    const NAME: &'static str = "ACK-ACK";
}

/// Message Not-Acknowledged
pub struct AckNak;

impl UbxPacketMeta for AckNak {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x00;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(2);
    const NAME: &'static str = "ACK-NAK";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AckKind {
    Ack,
    Nak,
}

/// Reply of the receiver to a configuration or poll message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Acknowledge {
    pub kind: AckKind,
    /// Class and ID of the (not-)acknowledged message
    pub message: MessageIdentity,
}

impl Acknowledge {
    /// Name of the message this acknowledgement refers to
    pub fn message_name(&self) -> Option<&'static str> {
        self.message.name()
    }

    pub fn is_ack_for<T: UbxPacketMeta>(&self) -> bool {
        self.kind == AckKind::Ack && self.message == T::IDENTITY
    }

    pub fn is_nak_for<T: UbxPacketMeta>(&self) -> bool {
        self.kind == AckKind::Nak && self.message == T::IDENTITY
    }
}

fn decode_ack<P: UbxPacketMeta>(
    kind: AckKind,
    payload: &[u8],
) -> Result<Acknowledge, DecodeError> {
    let mut r = PayloadReader::for_packet::<P>(payload)?;
    let class = r.u8()?;
    let id = r.u8()?;
    Ok(Acknowledge {
        kind,
        message: MessageIdentity::new(class, id),
    })
}

impl UbxPacketDecode for AckAck {
    type Record = Acknowledge;

    fn decode(payload: &[u8]) -> Result<Acknowledge, DecodeError> {
        decode_ack::<Self>(AckKind::Ack, payload)
    }
}

impl UbxPacketDecode for AckNak {
    type Record = Acknowledge;

    fn decode(payload: &[u8]) -> Result<Acknowledge, DecodeError> {
        decode_ack::<Self>(AckKind::Nak, payload)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ubx_packets::packets::{CfgMsg, CfgPrt};

    #[test]
    fn ack_names_acked_message() {
        let ack = AckAck::decode(&[0x06, 0x01]).unwrap();
        assert_eq!(ack.kind, AckKind::Ack);
        assert_eq!(ack.message_name(), Some("CFG-MSG"));
        assert!(ack.is_ack_for::<CfgMsg>());
        assert!(!ack.is_ack_for::<CfgPrt>());
        assert!(!ack.is_nak_for::<CfgMsg>());
    }

    #[test]
    fn nak_of_unknown_message() {
        let nak = AckNak::decode(&[0x7f, 0x7f]).unwrap();
        assert_eq!(nak.kind, AckKind::Nak);
        assert_eq!(nak.message_name(), None);
    }

    #[test]
    fn short_ack_is_truncated() {
        assert_eq!(
            AckAck::decode(&[0x06]),
            Err(DecodeError::TruncatedPayload {
                packet: "ACK-ACK",
                expect: 2,
                got: 1
            })
        );
    }
}
