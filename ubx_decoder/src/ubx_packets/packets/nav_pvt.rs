use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    error::{DateTimeError, DecodeError},
    ubx_packets::{
        reader::PayloadReader,
        types::{GpsFix, Position, PvtFlags, PvtValidFlags, Velocity},
        UbxPacketDecode, UbxPacketMeta,
    },
};

/// Navigation Position Velocity Time Solution
pub struct NavPvt;

impl UbxPacketMeta for NavPvt {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x07;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const NAME: &'static str = "NAV-PVT";
}

/// Payload length sent by receivers speaking protocol versions below 15,
/// which lack the vehicle heading and magnetic declination fields
pub const NAV_PVT_LEGACY_LEN: usize = 84;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionFix {
    /// GPS Millisecond Time of Week
    pub itow: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub valid: PvtValidFlags,
    /// Time accuracy estimate in ns
    pub time_accuracy: u32,
    /// Fraction of second in ns, range -1e9 .. 1e9
    pub nanosecond: i32,
    pub fix_type: GpsFix,
    pub flags: PvtFlags,
    pub flags2: u8,
    pub num_satellites: u8,
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Height above ellipsoid in meters
    pub height: f64,
    /// Height above mean sea level in meters
    pub height_msl: f64,
    pub h_acc: f64,
    pub v_acc: f64,
    /// NED velocity in m/s
    pub vel_north: f64,
    pub vel_east: f64,
    pub vel_down: f64,
    /// Ground speed (2-D) in m/s
    pub ground_speed: f64,
    /// Heading of motion (2-D) in degrees
    pub heading_motion: f64,
    pub speed_accuracy: f64,
    pub heading_accuracy: f64,
    pub pdop: f32,
    pub flags3: u8,
    /// Heading of vehicle in degrees, absent from legacy payloads
    pub vehicle_heading: Option<f64>,
    /// Magnetic declination in degrees, absent from legacy payloads
    pub magnetic_declination: Option<f64>,
    pub magnetic_declination_accuracy: Option<f64>,
}

fn mm(raw: i32) -> f64 {
    f64::from(raw) * 1e-3
}

impl UbxPacketDecode for NavPvt {
    type Record = PositionFix;

    fn decode(payload: &[u8]) -> Result<PositionFix, DecodeError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        r.require(NAV_PVT_LEGACY_LEN)?;
        let itow = r.u32()?;
        let year = r.u16()?;
        let month = r.u8()?;
        let day = r.u8()?;
        let hour = r.u8()?;
        let min = r.u8()?;
        let sec = r.u8()?;
        let valid = PvtValidFlags::from_bits_retain(r.u8()?);
        let time_accuracy = r.u32()?;
        let nanosecond = r.i32()?;
        let fix_type = GpsFix::from(r.u8()?);
        let flags = PvtFlags::from_bits_retain(r.u8()?);
        let flags2 = r.u8()?;
        let num_satellites = r.u8()?;
        let lon = f64::from(r.i32()?) * 1e-7;
        let lat = f64::from(r.i32()?) * 1e-7;
        let height = mm(r.i32()?);
        let height_msl = mm(r.i32()?);
        let h_acc = f64::from(r.u32()?) * 1e-3;
        let v_acc = f64::from(r.u32()?) * 1e-3;
        let vel_north = mm(r.i32()?);
        let vel_east = mm(r.i32()?);
        let vel_down = mm(r.i32()?);
        let ground_speed = mm(r.i32()?);
        let heading_motion = f64::from(r.i32()?) * 1e-5;
        let speed_accuracy = f64::from(r.u32()?) * 1e-3;
        let heading_accuracy = f64::from(r.u32()?) * 1e-5;
        let pdop = f32::from(r.u16()?) * 1e-2;
        let flags3 = r.u8()?;
        r.skip(5)?;

        let (vehicle_heading, magnetic_declination, magnetic_declination_accuracy) =
            if r.remaining() >= 8 {
                let head_veh = f64::from(r.i32()?) * 1e-5;
                let mag_dec = f64::from(r.i16()?) * 1e-2;
                let mag_acc = f64::from(r.u16()?) * 1e-2;
                (Some(head_veh), Some(mag_dec), Some(mag_acc))
            } else {
                (None, None, None)
            };

        Ok(PositionFix {
            itow,
            year,
            month,
            day,
            hour,
            min,
            sec,
            valid,
            time_accuracy,
            nanosecond,
            fix_type,
            flags,
            flags2,
            num_satellites,
            lon,
            lat,
            height,
            height_msl,
            h_acc,
            v_acc,
            vel_north,
            vel_east,
            vel_down,
            ground_speed,
            heading_motion,
            speed_accuracy,
            heading_accuracy,
            pdop,
            flags3,
            vehicle_heading,
            magnetic_declination,
            magnetic_declination_accuracy,
        })
    }
}

impl PositionFix {
    pub fn position(&self) -> Position {
        Position::from(self)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::from(self)
    }

    /// UTC timestamp of the solution, if the receiver flags both date and
    /// time of day as valid
    pub fn utc_timestamp(&self) -> Option<DateTime<Utc>> {
        if !self
            .valid
            .contains(PvtValidFlags::VALID_DATE | PvtValidFlags::VALID_TIME)
        {
            return None;
        }
        DateTime::<Utc>::try_from(self).ok()
    }
}

impl TryFrom<&PositionFix> for DateTime<Utc> {
    type Error = DateTimeError;

    fn try_from(sol: &PositionFix) -> Result<Self, Self::Error> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(sol.year),
            u32::from(sol.month),
            u32::from(sol.day),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(
            u32::from(sol.hour),
            u32::from(sol.min),
            u32::from(sol.sec),
        )
        .ok_or(DateTimeError::InvalidTime)?;
        const NANOS_LIM: u32 = 1_000_000_000;
        if sol.nanosecond.unsigned_abs() >= NANOS_LIM {
            return Err(DateTimeError::InvalidNanoseconds);
        }

        let dt = NaiveDateTime::new(date, time)
            + chrono::Duration::nanoseconds(i64::from(sol.nanosecond));

        Ok(DateTime::from_naive_utc_and_offset(dt, Utc))
    }
}
