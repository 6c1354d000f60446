use ubx_decoder::{
    build_config_message, build_poll, build_rate_poll, dispatch,
    packets::{CfgMsg, MessageRates, NavPosLlh, NavPvt, NavSvInfo, PortRates},
    scan, startup_polls, MessageIdentity, MessageRateConfig, PollBuilder, SemanticRecord,
    UbxPacketMeta,
};

#[test]
fn test_cfg_msg_simple() {
    assert_eq!(
        [
            0xb5, 0x62, 0x06, 0x01, 0x08, 0x00, 0x01, 0x02, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x13, 0xbe
        ],
        PollBuilder::set_rate_for::<NavPosLlh>(PortRates {
            uart1: 1,
            ..PortRates::default()
        })
        .to_bytes()[..]
    );
}

#[test]
fn test_startup_polls() {
    let bytes: Vec<Vec<u8>> = startup_polls().iter().map(|f| f.to_bytes()).collect();
    assert_eq!(
        bytes,
        [
            vec![0xb5, 0x62, 0x06, 0x00, 0x00, 0x00, 0x06, 0x18],
            vec![0xb5, 0x62, 0x0a, 0x04, 0x00, 0x00, 0x0e, 0x34],
        ]
    );
}

#[test]
fn test_rate_poll() {
    assert_eq!(
        build_rate_poll(NavSvInfo::IDENTITY).to_bytes(),
        [0xb5, 0x62, 0x06, 0x01, 0x02, 0x00, 0x01, 0x30, 0x3a, 0x63]
    );
}

#[test]
fn test_write_to_sink() {
    let frame = build_poll(NavPvt::IDENTITY);
    let mut sink: Vec<u8> = Vec::new();
    frame.write_to(&mut sink).unwrap();
    assert_eq!(sink, frame.to_bytes());
}

fn round_trip(identity: MessageIdentity, rates: PortRates) -> MessageRateConfig {
    let bytes = build_config_message(identity, rates).to_bytes();
    let (consumed, frame) = scan(&bytes);
    assert_eq!(consumed, bytes.len());
    let frame = frame.unwrap().to_frame();
    assert_eq!(frame.identity(), CfgMsg::IDENTITY);
    match dispatch(&frame).unwrap() {
        SemanticRecord::MessageRateConfig(cfg) => cfg,
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_config_message_round_trip() {
    for (identity, rates, name) in [
        (NavPvt::IDENTITY, PortRates::ALL_ON, "NAV-PVT"),
        (NavSvInfo::IDENTITY, PortRates::ALL_OFF, "NAV-SVINFO"),
        (
            MessageIdentity::new(0xf0, 0x00),
            PortRates::from_array([0, 1, 2, 3, 4, 5]),
            "NMEA-GGA",
        ),
        (
            MessageIdentity::new(0xf1, 0x04),
            PortRates::ALL_OFF,
            "PUBX-TIME",
        ),
    ] {
        let cfg = round_trip(identity, rates);
        assert_eq!(cfg.message, identity);
        assert_eq!(cfg.rates, MessageRates::PerPort(rates));
        assert_eq!(cfg.message_name(), Some(name));
    }
}
