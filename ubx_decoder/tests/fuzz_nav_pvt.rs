//! A proptest generator for U-Blox NAV-PVT messages.
//!
//! Frames are generated at both payload lengths receivers send (92 bytes,
//! and 84 bytes for protocol versions below 15), split into random chunks
//! and fed through the decoder.

use byteorder::{LittleEndian, WriteBytesExt};
use proptest::prelude::*;
use ubx_decoder::{GpsFix, SemanticRecord, UbxDecoder};

const SYNC_CHAR_1: u8 = 0xB5;
const SYNC_CHAR_2: u8 = 0x62;

#[derive(Debug, Clone)]
pub struct NavPvtPayload {
    pub itow: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub valid: u8,
    pub fix_type: u8,
    pub num_sv: u8,
    pub lon: i32,
    pub lat: i32,
    pub height: i32,
    pub h_msl: i32,
    pub g_speed: i32,
    pub head_mot: i32,
    pub p_dop: u16,
    pub head_veh: i32,
    pub mag_dec: i16,
    pub legacy: bool,
}

impl NavPvtPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(92);
        wtr.write_u32::<LittleEndian>(self.itow).unwrap();
        wtr.write_u16::<LittleEndian>(self.year).unwrap();
        wtr.write_u8(self.month).unwrap();
        wtr.write_u8(self.day).unwrap();
        wtr.write_u8(self.hour).unwrap();
        wtr.write_u8(self.min).unwrap();
        wtr.write_u8(self.sec).unwrap();
        wtr.write_u8(self.valid).unwrap();
        wtr.write_u32::<LittleEndian>(25).unwrap(); // tAcc
        wtr.write_i32::<LittleEndian>(0).unwrap(); // nano
        wtr.write_u8(self.fix_type).unwrap();
        wtr.write_u8(0x01).unwrap(); // flags
        wtr.write_u8(0).unwrap(); // flags2
        wtr.write_u8(self.num_sv).unwrap();
        wtr.write_i32::<LittleEndian>(self.lon).unwrap();
        wtr.write_i32::<LittleEndian>(self.lat).unwrap();
        wtr.write_i32::<LittleEndian>(self.height).unwrap();
        wtr.write_i32::<LittleEndian>(self.h_msl).unwrap();
        wtr.write_u32::<LittleEndian>(1_500).unwrap(); // hAcc
        wtr.write_u32::<LittleEndian>(2_500).unwrap(); // vAcc
        wtr.write_i32::<LittleEndian>(0).unwrap(); // velN
        wtr.write_i32::<LittleEndian>(0).unwrap(); // velE
        wtr.write_i32::<LittleEndian>(0).unwrap(); // velD
        wtr.write_i32::<LittleEndian>(self.g_speed).unwrap();
        wtr.write_i32::<LittleEndian>(self.head_mot).unwrap();
        wtr.write_u32::<LittleEndian>(100).unwrap(); // sAcc
        wtr.write_u32::<LittleEndian>(500_000).unwrap(); // headAcc
        wtr.write_u16::<LittleEndian>(self.p_dop).unwrap();
        wtr.write_u8(0).unwrap(); // flags3
        wtr.extend_from_slice(&[0u8; 5]);
        if !self.legacy {
            wtr.write_i32::<LittleEndian>(self.head_veh).unwrap();
            wtr.write_i16::<LittleEndian>(self.mag_dec).unwrap();
            wtr.write_u16::<LittleEndian>(100).unwrap(); // magAcc
        }
        wtr
    }
}

/// Calculates the 8-bit Fletcher-16 checksum used by u-blox.
fn calculate_checksum(data: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for byte in data {
        ck_a = ck_a.wrapping_add(*byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

fn nav_pvt_payload_strategy() -> impl Strategy<Value = NavPvtPayload> {
    let time = (
        0u32..604_800_000,
        2000u16..2100,
        1u8..=12,
        1u8..=28,
        0u8..24,
        0u8..60,
        0u8..60,
        any::<u8>(),
    );
    let fix = (
        0u8..=6,
        any::<u8>(),
        -1_800_000_000i32..=1_800_000_000,
        -900_000_000i32..=900_000_000,
        any::<i32>(),
        any::<i32>(),
    );
    let motion = (
        any::<i32>(),
        0i32..36_000_000,
        any::<u16>(),
        any::<i32>(),
        any::<i16>(),
        any::<bool>(),
    );
    (time, fix, motion).prop_map(
        |(
            (itow, year, month, day, hour, min, sec, valid),
            (fix_type, num_sv, lon, lat, height, h_msl),
            (g_speed, head_mot, p_dop, head_veh, mag_dec, legacy),
        )| NavPvtPayload {
            itow,
            year,
            month,
            day,
            hour,
            min,
            sec,
            valid,
            fix_type,
            num_sv,
            lon,
            lat,
            height,
            h_msl,
            g_speed,
            head_mot,
            p_dop,
            head_veh,
            mag_dec,
            legacy,
        },
    )
}

/// A complete, valid UBX frame containing a NAV-PVT message, along with the
/// source payload struct.
pub fn ubx_nav_pvt_frame_strategy() -> impl Strategy<Value = (NavPvtPayload, Vec<u8>)> {
    nav_pvt_payload_strategy().prop_map(|payload_struct| {
        let payload = payload_struct.to_bytes();
        let mut frame_core = Vec::with_capacity(4 + payload.len());
        frame_core.push(0x01);
        frame_core.push(0x07);
        frame_core
            .write_u16::<LittleEndian>(payload.len() as u16)
            .unwrap();
        frame_core.extend_from_slice(&payload);

        let (ck_a, ck_b) = calculate_checksum(&frame_core);

        let mut final_frame = Vec::with_capacity(8 + payload.len());
        final_frame.push(SYNC_CHAR_1);
        final_frame.push(SYNC_CHAR_2);
        final_frame.extend_from_slice(&frame_core);
        final_frame.push(ck_a);
        final_frame.push(ck_b);

        (payload_struct, final_frame)
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

proptest! {
    #[test]
    fn test_decoder_with_generated_nav_pvt_frames(
        (expected, frame) in ubx_nav_pvt_frame_strategy(),
        chunk in 1usize..40,
    ) {
        let mut decoder = UbxDecoder::default();
        let mut records = Vec::new();
        for part in frame.chunks(chunk) {
            decoder.process(part, |item| records.push(item));
        }
        prop_assert_eq!(records.len(), 1);
        let decoded = records.pop().unwrap().unwrap();
        prop_assert_eq!(decoded.frame.to_bytes(), frame);
        let SemanticRecord::PositionFix(fix) = decoded.record else {
            panic!("NAV-PVT frame decoded as something else");
        };

        prop_assert_eq!(fix.itow, expected.itow);
        prop_assert_eq!(fix.year, expected.year);
        prop_assert_eq!(fix.fix_type, GpsFix::from(expected.fix_type));
        prop_assert_eq!(fix.num_satellites, expected.num_sv);
        prop_assert!(close(fix.lon, f64::from(expected.lon) * 1e-7));
        prop_assert!(close(fix.lat, f64::from(expected.lat) * 1e-7));
        prop_assert!(close(fix.height, f64::from(expected.height) / 1000.0));
        prop_assert!(close(fix.height_msl, f64::from(expected.h_msl) / 1000.0));
        prop_assert!(close(fix.h_acc, 1.5));
        prop_assert!(close(fix.ground_speed, f64::from(expected.g_speed) / 1000.0));
        prop_assert!(close(fix.heading_motion, f64::from(expected.head_mot) * 1e-5));
        prop_assert!((fix.pdop - f32::from(expected.p_dop) * 0.01).abs() < 1e-3);

        if expected.legacy {
            prop_assert_eq!(fix.vehicle_heading, None);
            prop_assert_eq!(fix.magnetic_declination, None);
        } else {
            prop_assert!(close(
                fix.vehicle_heading.unwrap(),
                f64::from(expected.head_veh) * 1e-5
            ));
            prop_assert!(close(
                fix.magnetic_declination.unwrap(),
                f64::from(expected.mag_dec) * 1e-2
            ));
        }

        let valid_date_time = expected.valid & 0x03 == 0x03;
        prop_assert_eq!(fix.utc_timestamp().is_some(), valid_date_time);
    }
}
