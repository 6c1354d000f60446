use alloc::{string::String, vec::Vec};

use crate::{
    error::DecodeError,
    ubx_packets::{
        reader::{null_padded_str, PayloadReader},
        UbxPacketDecode, UbxPacketMeta,
    },
};

/// Receiver/Software Version
pub struct MonVer;

impl UbxPacketMeta for MonVer {
    const CLASS: u8 = 0x0a;
    const ID: u8 = 0x04;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const NAME: &'static str = "MON-VER";
}

const SW_VERSION_LEN: usize = 30;
const HW_VERSION_LEN: usize = 10;
const EXTENSION_LEN: usize = 30;

/// GNSS names that may appear in the extension strings, in reporting order
pub const GNSS_NAMES: [&str; 7] = ["GPS", "GLO", "GAL", "BDS", "SBAS", "IMES", "QZSS"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VersionInfo {
    pub software_version: String,
    pub hardware_version: String,
    /// Extended software information strings
    pub extensions: Vec<String>,
    /// Value of the `FWVER=` extension
    pub firmware_version: Option<String>,
    /// Value of the `PROTVER=` extension
    pub protocol_version: Option<String>,
    /// Constellations named anywhere in the extensions
    pub supported_gnss: Vec<&'static str>,
}

impl VersionInfo {
    /// Software version with the `ROM CORE`/`EXT CORE` prefixes shortened
    /// to `ROM`/`Flash`
    pub fn display_software_version(&self) -> String {
        self.software_version
            .replace("ROM CORE", "ROM")
            .replace("EXT CORE", "Flash")
    }

    /// Protocol version as a number, e.g. `18.0`
    pub fn protocol_version_number(&self) -> Option<f32> {
        self.protocol_version.as_deref()?.trim().parse().ok()
    }
}

fn extension_value(ext: &str, markers: &[&str]) -> Option<String> {
    markers
        .iter()
        .find(|marker| ext.contains(*marker))
        .map(|marker| ext.replace(*marker, ""))
}

impl UbxPacketDecode for MonVer {
    type Record = VersionInfo;

    fn decode(payload: &[u8]) -> Result<VersionInfo, DecodeError> {
        let mut r = PayloadReader::new(Self::NAME, payload);
        r.require(SW_VERSION_LEN + HW_VERSION_LEN)?;
        let software_version = r.fixed_str(SW_VERSION_LEN)?;
        let hardware_version = r.fixed_str(HW_VERSION_LEN)?;

        // A trailing partial block carries no complete string; skip it.
        let tail = r.bytes(r.remaining())?;
        let extensions: Vec<String> = tail
            .chunks_exact(EXTENSION_LEN)
            .map(null_padded_str)
            .collect();

        let mut firmware_version = None;
        let mut protocol_version = None;
        let mut supported_gnss = Vec::new();
        for ext in &extensions {
            if let Some(fw) = extension_value(ext, &["FWVER="]) {
                firmware_version = Some(fw);
            }
            if let Some(proto) = extension_value(ext, &["PROTVER=", "PROTVER "]) {
                protocol_version = Some(proto);
            }
            for gnss in GNSS_NAMES {
                if ext.contains(gnss) && !supported_gnss.contains(&gnss) {
                    supported_gnss.push(gnss);
                }
            }
        }

        Ok(VersionInfo {
            software_version,
            hardware_version,
            extensions,
            firmware_version,
            protocol_version,
            supported_gnss,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn field(text: &str, len: usize) -> Vec<u8> {
        let mut out = text.as_bytes().to_vec();
        out.resize(len, 0);
        out
    }

    fn mon_ver(sw: &str, hw: &str, exts: &[&str]) -> Vec<u8> {
        let mut p = field(sw, SW_VERSION_LEN);
        p.extend(field(hw, HW_VERSION_LEN));
        for ext in exts {
            p.extend(field(ext, EXTENSION_LEN));
        }
        p
    }

    #[test]
    fn rom_receiver() {
        let payload = mon_ver(
            "ROM CORE 3.01 (107888)",
            "00080000",
            &[
                "FWVER=SPG 3.01",
                "PROTVER=18.00",
                "GPS;GLO;GAL;BDS",
                "SBAS;IMES;QZSS",
            ],
        );
        let ver = MonVer::decode(&payload).unwrap();
        assert_eq!(ver.software_version, "ROM CORE 3.01 (107888)");
        assert_eq!(ver.display_software_version(), "ROM 3.01 (107888)");
        assert_eq!(ver.hardware_version, "00080000");
        assert_eq!(ver.extensions.len(), 4);
        assert_eq!(ver.firmware_version.as_deref(), Some("SPG 3.01"));
        assert_eq!(ver.protocol_version.as_deref(), Some("18.00"));
        assert_eq!(ver.protocol_version_number(), Some(18.0));
        assert_eq!(ver.supported_gnss, GNSS_NAMES.to_vec());
    }

    #[test]
    fn flash_receiver() {
        let payload = mon_ver(
            "EXT CORE 3.01 (d189ff)",
            "00080000",
            &[
                "ROM BASE 3.01 (107888)",
                "FWVER=ADR 4.11",
                "PROTVER=19.10",
                "MOD=NEO-M8L-0",
                "FIS=0xEF4015 (100111)",
                "GPS;GLO;GAL;BDS",
                "SBAS;IMES;QZSS",
            ],
        );
        let ver = MonVer::decode(&payload).unwrap();
        assert_eq!(ver.display_software_version(), "Flash 3.01 (d189ff)");
        assert_eq!(ver.extensions[3], "MOD=NEO-M8L-0");
        assert_eq!(ver.firmware_version.as_deref(), Some("ADR 4.11"));
        assert_eq!(ver.protocol_version.as_deref(), Some("19.10"));
    }

    #[test]
    fn old_protver_spelling_and_no_extensions() {
        let ver = MonVer::decode(&mon_ver("7.03 (45969)", "00040007", &["PROTVER 14.00"])).unwrap();
        assert_eq!(ver.protocol_version.as_deref(), Some("14.00"));
        assert_eq!(ver.firmware_version, None);
        assert!(ver.supported_gnss.is_empty());

        let bare = MonVer::decode(&mon_ver("7.03 (45969)", "00040007", &[])).unwrap();
        assert!(bare.extensions.is_empty());
        assert_eq!(bare.protocol_version, None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut payload = mon_ver("ROM CORE", "0", &[]);
        payload[0] = 0xff;
        let ver = MonVer::decode(&payload).unwrap();
        assert!(ver.software_version.ends_with("OM CORE"));
    }

    #[test]
    fn too_short() {
        assert!(matches!(
            MonVer::decode(&[0; 39]),
            Err(DecodeError::TruncatedPayload {
                expect: 40,
                got: 39,
                ..
            })
        ));
    }
}
