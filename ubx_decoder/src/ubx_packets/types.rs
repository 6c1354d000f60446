use bitflags::bitflags;
use chrono::NaiveTime;
use core::fmt;

use super::packets::{GeodeticPosition, PositionFix, VelocityNed};

/// Represents a world position, can be constructed from NAV-POSLLH and NAV-PVT records.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,

    /// Altitude above mean sea level in meters
    pub alt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Velocity {
    /// m/s over the ground
    pub speed: f64,

    /// Heading in degrees
    pub heading: f64,
}

impl From<&GeodeticPosition> for Position {
    fn from(rec: &GeodeticPosition) -> Self {
        Position {
            lon: rec.lon,
            lat: rec.lat,
            alt: rec.height_msl,
        }
    }
}

impl From<&PositionFix> for Position {
    fn from(rec: &PositionFix) -> Self {
        Position {
            lon: rec.lon,
            lat: rec.lat,
            alt: rec.height_msl,
        }
    }
}

impl From<&PositionFix> for Velocity {
    fn from(rec: &PositionFix) -> Self {
        Velocity {
            speed: rec.ground_speed,
            heading: rec.heading_motion,
        }
    }
}

impl From<&VelocityNed> for Velocity {
    fn from(rec: &VelocityNed) -> Self {
        Velocity {
            speed: rec.ground_speed,
            heading: rec.heading,
        }
    }
}

/// GPS fix Type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GpsFix {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GpsPlusDeadReckoning,
    TimeOnlyFix,
    Reserved(u8),
}

impl From<u8> for GpsFix {
    fn from(raw: u8) -> Self {
        match raw {
            0 => GpsFix::NoFix,
            1 => GpsFix::DeadReckoningOnly,
            2 => GpsFix::Fix2D,
            3 => GpsFix::Fix3D,
            4 => GpsFix::GpsPlusDeadReckoning,
            5 => GpsFix::TimeOnlyFix,
            other => GpsFix::Reserved(other),
        }
    }
}

impl From<GpsFix> for u8 {
    fn from(fix: GpsFix) -> Self {
        match fix {
            GpsFix::NoFix => 0,
            GpsFix::DeadReckoningOnly => 1,
            GpsFix::Fix2D => 2,
            GpsFix::Fix3D => 3,
            GpsFix::GpsPlusDeadReckoning => 4,
            GpsFix::TimeOnlyFix => 5,
            GpsFix::Reserved(raw) => raw,
        }
    }
}

impl GpsFix {
    /// Fix label as written into GPX track points
    pub const fn track_label(self) -> &'static str {
        match self {
            GpsFix::Fix3D => "3d",
            GpsFix::Fix2D => "2d",
            _ => "none",
        }
    }
}

impl fmt::Display for GpsFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsFix::NoFix => f.write_str("NO FIX"),
            GpsFix::DeadReckoningOnly => f.write_str("DR"),
            GpsFix::Fix2D => f.write_str("2D"),
            GpsFix::Fix3D => f.write_str("3D"),
            GpsFix::GpsPlusDeadReckoning => f.write_str("GPS + DR"),
            GpsFix::TimeOnlyFix => f.write_str("TIME ONLY"),
            GpsFix::Reserved(raw) => write!(f, "RESERVED({})", raw),
        }
    }
}

/// Serial port a CFG-PRT or CFG-MSG entry applies to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PortId {
    /// I2C, called DDC in older protocol versions
    Ddc,
    Uart1,
    Uart2,
    Usb,
    Spi,
    Reserved(u8),
}

impl From<u8> for PortId {
    fn from(raw: u8) -> Self {
        match raw {
            0 => PortId::Ddc,
            1 => PortId::Uart1,
            2 => PortId::Uart2,
            3 => PortId::Usb,
            4 => PortId::Spi,
            other => PortId::Reserved(other),
        }
    }
}

impl PortId {
    /// Only the UARTs have a baud rate
    pub const fn is_uart(self) -> bool {
        matches!(self, PortId::Uart1 | PortId::Uart2)
    }
}

bitflags! {
    /// Navigation Status Flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct NavStatusFlags: u8 {
        /// position and velocity valid and within DOP and ACC Masks
        const GPS_FIX_OK = 1;
        /// DGPS used
        const DIFF_SOLN = 2;
        /// Week Number valid
        const WKN_SET = 4;
        /// Time of Week valid
        const TOW_SET = 8;
    }
}

bitflags! {
    /// Validity flags of NAV-PVT
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct PvtValidFlags: u8 {
        /// 1 = valid UTC Date
        const VALID_DATE = 0x01;
        /// 1 = valid UTC time of day
        const VALID_TIME = 0x02;
        /// 1 = UTC time of day has been fully resolved (no seconds uncertainty).
        /// Cannot be used to check if time is completely solved.
        const FULLY_RESOLVED = 0x04;
        /// 1 = valid magnetic declination
        const VALID_MAG = 0x08;
    }
}

bitflags! {
    /// Fix status flags of NAV-PVT
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct PvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

bitflags! {
    /// A mask describing which input protocols are active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct InProtoMask: u16 {
        const UBLOX = 1;
        const NMEA = 2;
        const RTCM = 4;
        /// The bitfield inRtcm3 is not supported in protocol
        /// versions less than 20
        const RTCM3 = 0x20;
    }
}

bitflags! {
    /// A mask describing which output protocols are active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct OutProtoMask: u16 {
        const UBLOX = 1;
        const NMEA = 2;
        /// The bitfield outRtcm3 is not supported in protocol
        /// versions less than 20
        const RTCM3 = 0x20;
    }
}

bitflags! {
    /// Per-channel flags of NAV-SVINFO
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct SvInfoFlags: u8 {
        /// SV is used for navigation
        const SV_USED = 0x01;
        /// Differential correction data is available for this SV
        const DIFF_CORR = 0x02;
        /// Orbit information is available for this SV (Ephemeris or Almanac)
        const ORBIT_AVAIL = 0x04;
        /// Orbit information is Ephemeris
        const ORBIT_EPH = 0x08;
        /// SV is unhealthy / shall not be used
        const UNHEALTHY = 0x10;
        /// Orbit information is Almanac Plus
        const ORBIT_ALM = 0x20;
        /// Orbit information is AssistNow Autonomous
        const ORBIT_AOP = 0x40;
        /// Carrier smoothed pseudorange used
        const SMOOTHED = 0x80;
    }
}

bitflags! {
    /// INF message kinds enabled on one port
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct InfMsgMask: u8 {
        const ERROR = 0x01;
        const WARNING = 0x02;
        const NOTICE = 0x04;
        const TEST = 0x08;
        const DEBUG = 0x10;
    }
}

const MILLIS_PER_DAY: u32 = 86_400_000;

/// Time of day encoded by a GPS time of week in milliseconds.
///
/// Leap seconds are not applied, so the result lags true UTC by the
/// current GPS-UTC offset.
pub fn itow_to_utc(itow: u32) -> Option<NaiveTime> {
    let ms = itow % MILLIS_PER_DAY;
    NaiveTime::from_num_seconds_from_midnight_opt(ms / 1000, (ms % 1000) * 1_000_000)
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;
    use chrono::Timelike;

    #[test]
    fn gps_fix_labels() {
        assert_eq!(GpsFix::from(3).track_label(), "3d");
        assert_eq!(GpsFix::from(2).track_label(), "2d");
        assert_eq!(GpsFix::from(1).track_label(), "none");
        assert_eq!(GpsFix::from(0).to_string(), "NO FIX");
        assert_eq!(GpsFix::from(1).to_string(), "DR");
        assert_eq!(GpsFix::from(4).to_string(), "GPS + DR");
        assert_eq!(GpsFix::from(5).to_string(), "TIME ONLY");
        assert_eq!(GpsFix::from(7).to_string(), "RESERVED(7)");
        assert_eq!(GpsFix::from(9), GpsFix::Reserved(9));
        assert_eq!(u8::from(GpsFix::Reserved(9)), 9);
    }

    #[test]
    fn itow_wraps_to_time_of_day() {
        // Monday 01:02:03.456 of the GPS week
        let itow = MILLIS_PER_DAY + ((3600 + 2 * 60 + 3) * 1000 + 456);
        let t = itow_to_utc(itow).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (1, 2, 3));
        assert_eq!(t.nanosecond(), 456_000_000);
    }

    #[test]
    fn proto_masks_keep_unknown_bits() {
        let mask = InProtoMask::from_bits_retain(0x0023);
        assert!(mask.contains(InProtoMask::UBLOX | InProtoMask::NMEA | InProtoMask::RTCM3));
        assert_eq!(mask.bits(), 0x0023);
    }

    #[test]
    fn only_uarts_have_baud() {
        assert!(PortId::from(1).is_uart());
        assert!(!PortId::from(3).is_uart());
        assert!(!PortId::from(0).is_uart());
    }
}
