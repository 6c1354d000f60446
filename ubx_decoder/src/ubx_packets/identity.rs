use core::fmt;

/// The (class, id) pair naming a UBX message type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageIdentity {
    pub class: u8,
    pub id: u8,
}

impl MessageIdentity {
    pub const fn new(class: u8, id: u8) -> Self {
        Self { class, id }
    }

    /// Sort key used by the static tables
    pub(crate) const fn key(self) -> u16 {
        u16::from_be_bytes([self.class, self.id])
    }

    /// Human readable name, e.g. `NAV-PVT`, if the identity is known
    pub fn name(self) -> Option<&'static str> {
        resolve_message_name(self.class, self.id)
    }

    /// Reverse lookup of [`name`](Self::name)
    pub fn from_name(name: &str) -> Option<Self> {
        MESSAGE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(identity, _)| *identity)
    }
}

impl fmt::Display for MessageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN-0x{:02X}-0x{:02X}", self.class, self.id),
        }
    }
}

/// Name of the message with the given class and id.
///
/// Used by acknowledgements to report which previously sent message is
/// being (not-)acknowledged.
pub fn resolve_message_name(class: u8, id: u8) -> Option<&'static str> {
    let key = MessageIdentity::new(class, id).key();
    MESSAGE_NAMES
        .binary_search_by_key(&key, |(identity, _)| identity.key())
        .ok()
        .map(|idx| MESSAGE_NAMES[idx].1)
}

macro_rules! message_names {
    ($($class:literal, $id:literal => $name:literal;)*) => {
        &[$((MessageIdentity::new($class, $id), $name)),*]
    };
}

/// Every UBX message the decoder can name, plus the NMEA and PUBX sentences
/// CFG-MSG can address, sorted by (class, id)
pub(crate) const MESSAGE_NAMES: &[(MessageIdentity, &str)] = message_names! {
    0x01, 0x01 => "NAV-POSECEF";
    0x01, 0x02 => "NAV-POSLLH";
    0x01, 0x03 => "NAV-STATUS";
    0x01, 0x04 => "NAV-DOP";
    0x01, 0x05 => "NAV-ATT";
    0x01, 0x06 => "NAV-SOL";
    0x01, 0x07 => "NAV-PVT";
    0x01, 0x09 => "NAV-ODO";
    0x01, 0x10 => "NAV-RESETODO";
    0x01, 0x11 => "NAV-VELECEF";
    0x01, 0x12 => "NAV-VELNED";
    0x01, 0x13 => "NAV-HPPOSECEF";
    0x01, 0x14 => "NAV-HPPOSLLH";
    0x01, 0x20 => "NAV-TIMEGPS";
    0x01, 0x21 => "NAV-TIMEUTC";
    0x01, 0x22 => "NAV-CLOCK";
    0x01, 0x23 => "NAV-TIMEGLO";
    0x01, 0x24 => "NAV-TIMEBDS";
    0x01, 0x25 => "NAV-TIMEGAL";
    0x01, 0x26 => "NAV-TIMELS";
    0x01, 0x27 => "NAV-TIMEQZSS";
    0x01, 0x30 => "NAV-SVINFO";
    0x01, 0x31 => "NAV-DGPS";
    0x01, 0x32 => "NAV-SBAS";
    0x01, 0x34 => "NAV-ORB";
    0x01, 0x35 => "NAV-SAT";
    0x01, 0x36 => "NAV-COV";
    0x01, 0x39 => "NAV-GEOFENCE";
    0x01, 0x3b => "NAV-SVIN";
    0x01, 0x3c => "NAV-RELPOSNED";
    0x01, 0x42 => "NAV-SLAS";
    0x01, 0x43 => "NAV-SIG";
    0x01, 0x60 => "NAV-AOPSTATUS";
    0x01, 0x61 => "NAV-EOE";
    0x01, 0x62 => "NAV-PL";
    0x02, 0x10 => "RXM-RAW";
    0x02, 0x11 => "RXM-SFRB";
    0x02, 0x13 => "RXM-SFRBX";
    0x02, 0x14 => "RXM-MEASX";
    0x02, 0x15 => "RXM-RAWX";
    0x02, 0x20 => "RXM-SVSI";
    0x02, 0x32 => "RXM-RTCM";
    0x02, 0x41 => "RXM-PMREQ";
    0x02, 0x59 => "RXM-RLM";
    0x02, 0x61 => "RXM-IMES";
    0x04, 0x00 => "INF-ERROR";
    0x04, 0x01 => "INF-WARNING";
    0x04, 0x02 => "INF-NOTICE";
    0x04, 0x03 => "INF-TEST";
    0x04, 0x04 => "INF-DEBUG";
    0x05, 0x00 => "ACK-NAK";
    0x05, 0x01 => "ACK-ACK";
    0x06, 0x00 => "CFG-PRT";
    0x06, 0x01 => "CFG-MSG";
    0x06, 0x02 => "CFG-INF";
    0x06, 0x04 => "CFG-RST";
    0x06, 0x06 => "CFG-DAT";
    0x06, 0x07 => "CFG-TP";
    0x06, 0x08 => "CFG-RATE";
    0x06, 0x09 => "CFG-CFG";
    0x06, 0x0e => "CFG-FXN";
    0x06, 0x11 => "CFG-RXM";
    0x06, 0x12 => "CFG-EKF";
    0x06, 0x13 => "CFG-ANT";
    0x06, 0x16 => "CFG-SBAS";
    0x06, 0x17 => "CFG-NMEA";
    0x06, 0x1b => "CFG-USB";
    0x06, 0x1d => "CFG-TMODE";
    0x06, 0x1e => "CFG-ODO";
    0x06, 0x23 => "CFG-NAVX5";
    0x06, 0x24 => "CFG-NAV5";
    0x06, 0x29 => "CFG-ESFGWT";
    0x06, 0x31 => "CFG-TP5";
    0x06, 0x34 => "CFG-RINV";
    0x06, 0x39 => "CFG-ITFM";
    0x06, 0x3b => "CFG-PM2";
    0x06, 0x3d => "CFG-TMODE2";
    0x06, 0x3e => "CFG-GNSS";
    0x06, 0x47 => "CFG-LOGFILTER";
    0x06, 0x53 => "CFG-TXSLOT";
    0x06, 0x57 => "CFG-PWR";
    0x06, 0x5c => "CFG-HNR";
    0x06, 0x60 => "CFG-ESRC";
    0x06, 0x61 => "CFG-DOSC";
    0x06, 0x62 => "CFG-SMGR";
    0x06, 0x69 => "CFG-GEOFENCE";
    0x06, 0x70 => "CFG-DGNSS";
    0x06, 0x71 => "CFG-TMODE3";
    0x06, 0x84 => "CFG-FIXSEED";
    0x06, 0x85 => "CFG-DYNSEED";
    0x06, 0x86 => "CFG-PMS";
    0x06, 0x8a => "CFG-VALSET";
    0x06, 0x8b => "CFG-VALGET";
    0x06, 0x8c => "CFG-VALDEL";
    0x06, 0x93 => "CFG-BATCH";
    0x09, 0x14 => "UPD-SOS";
    0x0a, 0x02 => "MON-IO";
    0x0a, 0x04 => "MON-VER";
    0x0a, 0x06 => "MON-MSGPP";
    0x0a, 0x07 => "MON-RXBUF";
    0x0a, 0x08 => "MON-TXBUF";
    0x0a, 0x09 => "MON-HW";
    0x0a, 0x0b => "MON-HW2";
    0x0a, 0x21 => "MON-RXR";
    0x0a, 0x27 => "MON-PATCH";
    0x0a, 0x28 => "MON-GNSS";
    0x0a, 0x2e => "MON-SMGR";
    0x0a, 0x31 => "MON-SPAN";
    0x0a, 0x36 => "MON-COMMS";
    0x0a, 0x37 => "MON-HW3";
    0x0a, 0x38 => "MON-RF";
    0x0b, 0x01 => "AID-INI";
    0x0b, 0x02 => "AID-HUI";
    0x0b, 0x30 => "AID-ALM";
    0x0b, 0x31 => "AID-EPH";
    0x0b, 0x32 => "AID-ALPSRV";
    0x0b, 0x33 => "AID-AOP";
    0x0b, 0x50 => "AID-ALP";
    0x0d, 0x01 => "TIM-TP";
    0x0d, 0x03 => "TIM-TM2";
    0x0d, 0x04 => "TIM-SVIN";
    0x0d, 0x06 => "TIM-VRFY";
    0x0d, 0x11 => "TIM-DOSC";
    0x0d, 0x12 => "TIM-TOS";
    0x0d, 0x13 => "TIM-SMEAS";
    0x0d, 0x15 => "TIM-VCOCAL";
    0x0d, 0x16 => "TIM-FCHG";
    0x0d, 0x17 => "TIM-HOC";
    0x10, 0x02 => "ESF-MEAS";
    0x10, 0x03 => "ESF-RAW";
    0x10, 0x10 => "ESF-STATUS";
    0x10, 0x14 => "ESF-ALG";
    0x10, 0x15 => "ESF-INS";
    0x13, 0x00 => "MGA-GPS";
    0x13, 0x02 => "MGA-GAL";
    0x13, 0x03 => "MGA-BDS";
    0x13, 0x05 => "MGA-QZSS";
    0x13, 0x06 => "MGA-GLO";
    0x13, 0x20 => "MGA-ANO";
    0x13, 0x21 => "MGA-FLASH";
    0x13, 0x40 => "MGA-INI";
    0x13, 0x60 => "MGA-ACK";
    0x13, 0x80 => "MGA-DBD";
    0x21, 0x03 => "LOG-ERASE";
    0x21, 0x04 => "LOG-STRING";
    0x21, 0x07 => "LOG-CREATE";
    0x21, 0x08 => "LOG-INFO";
    0x21, 0x09 => "LOG-RETRIEVE";
    0x21, 0x0b => "LOG-RETRIEVEPOS";
    0x21, 0x0d => "LOG-RETRIEVESTRING";
    0x21, 0x0e => "LOG-FINDTIME";
    0x21, 0x0f => "LOG-RETRIEVEPOSEXTRA";
    0x27, 0x01 => "SEC-SIGN";
    0x27, 0x03 => "SEC-UNIQID";
    0x28, 0x00 => "HNR-PVT";
    0x28, 0x01 => "HNR-ATT";
    0x28, 0x02 => "HNR-INS";
    // NMEA sentences, named so CFG-MSG rates and acks for them resolve
    0xf0, 0x00 => "NMEA-GGA";
    0xf0, 0x01 => "NMEA-GLL";
    0xf0, 0x02 => "NMEA-GSA";
    0xf0, 0x03 => "NMEA-GSV";
    0xf0, 0x04 => "NMEA-RMC";
    0xf0, 0x05 => "NMEA-VTG";
    0xf0, 0x06 => "NMEA-GRS";
    0xf0, 0x07 => "NMEA-GST";
    0xf0, 0x08 => "NMEA-ZDA";
    0xf0, 0x09 => "NMEA-GBS";
    0xf0, 0x0a => "NMEA-DTM";
    0xf0, 0x0d => "NMEA-GNS";
    0xf0, 0x0e => "NMEA-THS";
    0xf0, 0x0f => "NMEA-VLW";
    0xf0, 0x40 => "NMEA-GPQ";
    0xf0, 0x41 => "NMEA-TXT";
    0xf0, 0x42 => "NMEA-GNQ";
    0xf0, 0x43 => "NMEA-GLQ";
    0xf0, 0x44 => "NMEA-GBQ";
    0xf0, 0x45 => "NMEA-GAQ";
    0xf1, 0x00 => "PUBX-POSITION";
    0xf1, 0x03 => "PUBX-SVSTATUS";
    0xf1, 0x04 => "PUBX-TIME";
    0xf1, 0x05 => "PUBX-RATE";
    0xf1, 0x06 => "PUBX-CONFIG";
};

/// Strictly increasing keys: sorted for binary search and free of duplicates
pub(crate) const fn is_strictly_sorted<T>(table: &[(MessageIdentity, T)]) -> bool {
    let mut i = 1;
    while i < table.len() {
        if table[i - 1].0.key() >= table[i].0.key() {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    is_strictly_sorted(MESSAGE_NAMES),
    "MESSAGE_NAMES must be sorted by (class, id) without duplicates"
);
