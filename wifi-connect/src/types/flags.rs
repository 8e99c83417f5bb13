//! Access point capability and security flags.
//!
//! Bit values mirror `NM80211ApFlags` and `NM80211ApSecurityFlags` from the
//! NetworkManager D-Bus API. Unknown bits are retained when converting from
//! the raw `u32` so emptiness checks see exactly what the access point sent.

use bitflags::bitflags;

bitflags! {
    /// General capability flags (`Flags` property of an access point).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ApFlags: u32 {
        /// Access point requires authentication and encryption (usually WEP).
        const PRIVACY = 0x1;
        /// Access point supports some WPS method.
        const WPS = 0x2;
        /// Access point supports push-button WPS.
        const WPS_PBC = 0x4;
        /// Access point supports PIN-based WPS.
        const WPS_PIN = 0x8;
    }
}

bitflags! {
    /// Security capabilities (`WpaFlags` and `RsnFlags` properties).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ApSecurityFlags: u32 {
        const PAIR_WEP40 = 0x1;
        const PAIR_WEP104 = 0x2;
        const PAIR_TKIP = 0x4;
        const PAIR_CCMP = 0x8;
        const GROUP_WEP40 = 0x10;
        const GROUP_WEP104 = 0x20;
        const GROUP_TKIP = 0x40;
        const GROUP_CCMP = 0x80;
        /// WPA/RSN pre-shared key.
        const KEY_MGMT_PSK = 0x100;
        /// 802.1X authentication and key management.
        const KEY_MGMT_802_1X = 0x200;
        /// WPA3 personal.
        const KEY_MGMT_SAE = 0x400;
        const KEY_MGMT_OWE = 0x800;
        const KEY_MGMT_OWE_TM = 0x1000;
        const KEY_MGMT_EAP_SUITE_B_192 = 0x2000;
    }
}

impl From<u32> for ApFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<u32> for ApSecurityFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}
