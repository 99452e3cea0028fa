//! Author: [Seclususs](https://github.com/seclususs)

pub struct ValueTweak {
    pub key: &'static str,
    pub value: &'static str,
}

pub fn get_boot_prop_tweaks() -> &'static [ValueTweak] {
    &[ValueTweak {
        key: "persist.sys.disable_rescue",
        value: "true",
    }]
}

pub fn get_network_setting_tweaks() -> &'static [ValueTweak] {
    &[ValueTweak {
        key: "restricted_networking_mode",
        value: "0",
    }]
}
