use crate::{
    error::DecodeError,
    ubx_packets::{reader::PayloadReader, MessageIdentity, UbxPacketDecode, UbxPacketMeta},
};

/// Set / Get Message Rate
///
/// Send rate is relative to the event a message is registered on.
/// For example, if the rate of a navigation message is set to 2,
/// the message is sent every second navigation solution.
pub struct CfgMsg;

impl UbxPacketMeta for CfgMsg {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const NAME: &'static str = "CFG-MSG";
}

/// Output rate of a message on each of the six I/O targets, in the wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortRates {
    pub ddc: u8,
    pub uart1: u8,
    pub uart2: u8,
    pub usb: u8,
    pub spi: u8,
    pub reserved: u8,
}

impl PortRates {
    /// Output on every port at every solution
    pub const ALL_ON: PortRates = PortRates::from_array([1, 1, 1, 1, 1, 1]);
    /// Output disabled on the physical ports
    pub const ALL_OFF: PortRates = PortRates::from_array([0, 0, 0, 0, 0, 1]);

    pub const fn from_array(rates: [u8; 6]) -> Self {
        Self {
            ddc: rates[0],
            uart1: rates[1],
            uart2: rates[2],
            usb: rates[3],
            spi: rates[4],
            reserved: rates[5],
        }
    }

    pub const fn to_array(self) -> [u8; 6] {
        [
            self.ddc,
            self.uart1,
            self.uart2,
            self.usb,
            self.spi,
            self.reserved,
        ]
    }
}

/// The three payload forms CFG-MSG comes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MessageRates {
    /// 8 byte form: one rate per port
    PerPort(PortRates),
    /// 3 byte form: rate on the port the message was received on
    CurrentPort(u8),
    /// 2 byte form: request for the current rates
    Poll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageRateConfig {
    /// Message the rates apply to
    pub message: MessageIdentity,
    pub rates: MessageRates,
}

impl MessageRateConfig {
    pub fn message_name(&self) -> Option<&'static str> {
        self.message.name()
    }

    /// Per port rates, if this is the 8 byte form
    pub fn port_rates(&self) -> Option<PortRates> {
        match self.rates {
            MessageRates::PerPort(rates) => Some(rates),
            _ => None,
        }
    }
}

impl UbxPacketDecode for CfgMsg {
    type Record = MessageRateConfig;

    fn decode(payload: &[u8]) -> Result<MessageRateConfig, DecodeError> {
        // The length selects the form, so anything else is not a CFG-MSG
        if !matches!(payload.len(), 2 | 3 | 8) {
            return Err(DecodeError::InvalidField {
                packet: Self::NAME,
                field: "length",
            });
        }
        let mut r = PayloadReader::new(Self::NAME, payload);
        let message = MessageIdentity::new(r.u8()?, r.u8()?);
        let rates = match payload.len() {
            2 => MessageRates::Poll,
            3 => MessageRates::CurrentPort(r.u8()?),
            _ => {
                let mut rates = [0u8; 6];
                rates.copy_from_slice(r.bytes(6)?);
                MessageRates::PerPort(PortRates::from_array(rates))
            },
        };
        Ok(MessageRateConfig { message, rates })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn per_port_rates() {
        let cfg = CfgMsg::decode(&[0x01, 0x07, 0, 1, 0, 2, 0, 0]).unwrap();
        assert_eq!(cfg.message_name(), Some("NAV-PVT"));
        assert_eq!(
            cfg.port_rates(),
            Some(PortRates {
                uart1: 1,
                usb: 2,
                ..PortRates::default()
            })
        );
    }

    #[test]
    fn short_forms() {
        let current = CfgMsg::decode(&[0x01, 0x30, 5]).unwrap();
        assert_eq!(current.rates, MessageRates::CurrentPort(5));
        assert_eq!(current.port_rates(), None);

        let poll = CfgMsg::decode(&[0x01, 0x30]).unwrap();
        assert_eq!(poll.rates, MessageRates::Poll);
    }

    #[test]
    fn other_lengths_are_invalid() {
        let invalid = Err(DecodeError::InvalidField {
            packet: "CFG-MSG",
            field: "length",
        });
        assert_eq!(CfgMsg::decode(&[0x01, 0x30, 1, 1, 1]), invalid);
        assert_eq!(CfgMsg::decode(&[0x01, 0x30, 0, 1, 0, 0, 0, 0, 0]), invalid);
        assert_eq!(CfgMsg::decode(&[0x01]), invalid);
        assert_eq!(CfgMsg::decode(&[]), invalid);
    }

    #[test]
    fn presets() {
        assert_eq!(PortRates::ALL_ON.to_array(), [1; 6]);
        assert_eq!(PortRates::ALL_OFF.to_array(), [0, 0, 0, 0, 0, 1]);
    }
}
