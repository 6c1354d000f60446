//! Outbound frames: polls and message rate configuration.
//!
//! Everything here produces a [`Frame`] whose checksum is computed with the
//! same routine the parser validates with, so a built frame always scans
//! back successfully.

use alloc::vec::Vec;

use crate::ubx_packets::{
    frame::Frame,
    packets::{CfgMsg, CfgPrt, MonVer, PortRates},
    MessageIdentity, UbxPacketMeta,
};

/// Request the current content of a message by sending it with an empty
/// payload.
pub fn build_poll(identity: MessageIdentity) -> Frame {
    Frame::new(identity, Vec::new())
}

/// CFG-MSG setting the output rate of `identity` on every port
pub fn build_config_message(identity: MessageIdentity, rates: PortRates) -> Frame {
    let mut payload = Vec::with_capacity(8);
    payload.extend_from_slice(&[identity.class, identity.id]);
    payload.extend_from_slice(&rates.to_array());
    Frame::new(CfgMsg::IDENTITY, payload)
}

/// CFG-MSG asking for the current output rates of `identity`
pub fn build_rate_poll(identity: MessageIdentity) -> Frame {
    Frame::new(CfgMsg::IDENTITY, alloc::vec![identity.class, identity.id])
}

/// Polls sent once a receiver is connected: port configuration, then
/// version information. Replies arrive asynchronously and are matched by
/// the dispatcher like any other message.
pub fn startup_polls() -> [Frame; 2] {
    [build_poll(CfgPrt::IDENTITY), build_poll(MonVer::IDENTITY)]
}

/// Typed shortcuts over the free functions
pub struct PollBuilder;

impl PollBuilder {
    pub fn poll<T: UbxPacketMeta>() -> Frame {
        build_poll(T::IDENTITY)
    }

    pub fn set_rate_for<T: UbxPacketMeta>(rates: PortRates) -> Frame {
        build_config_message(T::IDENTITY, rates)
    }

    pub fn poll_rate_for<T: UbxPacketMeta>() -> Frame {
        build_rate_poll(T::IDENTITY)
    }
}
