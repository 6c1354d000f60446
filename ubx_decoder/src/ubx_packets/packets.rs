//! One module per supported message: a marker type carrying the
//! class/id metadata, the decoded record and its decode routine.

pub mod ack;
pub mod cfg_inf;
pub mod cfg_msg;
pub mod cfg_prt;
pub mod mon_ver;
pub mod nav_dop;
pub mod nav_pos_llh;
pub mod nav_pvt;
pub mod nav_sol;
pub mod nav_sv_info;
pub mod nav_vel_ned;

pub use ack::{AckAck, AckKind, AckNak, Acknowledge};
pub use cfg_inf::{CfgInf, InfoConfig, InfoProtocolConfig};
pub use cfg_msg::{CfgMsg, MessageRateConfig, MessageRates, PortRates};
pub use cfg_prt::{CfgPrt, PortConfig};
pub use mon_ver::{MonVer, VersionInfo, GNSS_NAMES};
pub use nav_dop::{DilutionOfPrecision, NavDop};
pub use nav_pos_llh::{GeodeticPosition, NavPosLlh};
pub use nav_pvt::{NavPvt, PositionFix, NAV_PVT_LEGACY_LEN};
pub use nav_sol::{NavSol, NavSolution};
pub use nav_sv_info::{NavSvInfo, SatelliteInfo, SatelliteView};
pub use nav_vel_ned::{NavVelNed, VelocityNed};
