//! Settings container wiring
//!
//! Registers one container per settings page. Field names are the keys in
//! the settings files, so they must not change between releases.

use ticker_core::{SettingsContainer, SettingsRegistry};
use ticker_hal::FileSystem;

use crate::state::DeviceState;

pub const DEVICE_SETTINGS: &str = "deviceSettings";
pub const WEERLIVE_SETTINGS: &str = "weerliveSettings";
pub const MEDIASTACK_SETTINGS: &str = "mediastackSettings";
pub const PAROLA_SETTINGS: &str = "parolaSettings";
pub const RSSFEED_SETTINGS: &str = "rssfeedSettings";

/// Keys of all containers, in boot order
pub const ALL_SETTINGS: [&str; 5] = [
    DEVICE_SETTINGS,
    WEERLIVE_SETTINGS,
    MEDIASTACK_SETTINGS,
    PAROLA_SETTINGS,
    RSSFEED_SETTINGS,
];

/// Build the registry with every settings container
pub fn register_containers<F: FileSystem>(fs: F) -> SettingsRegistry<DeviceState, F> {
    let mut registry = SettingsRegistry::new(fs);
    registry
        .register(DEVICE_SETTINGS, device_container())
        .register(WEERLIVE_SETTINGS, weerlive_container())
        .register(MEDIASTACK_SETTINGS, mediastack_container())
        .register(PAROLA_SETTINGS, parola_container())
        .register(RSSFEED_SETTINGS, rssfeed_container());
    registry
}

fn device_container() -> SettingsContainer<DeviceState> {
    let mut c =
        SettingsContainer::<DeviceState>::new("Device Settings", "/settings.ini", DEVICE_SETTINGS);
    c.add_text(
        "hostname",
        "hostname",
        32,
        |s| &s.device.hostname,
        |s| &mut s.device.hostname,
    )
    .add_number(
        "tickerSpeed",
        "Ticker Scroll Speed",
        10,
        120,
        1,
        |s| &s.device.ticker_speed,
        |s| &mut s.device.ticker_speed,
    )
    .add_number(
        "LDRMinWaarde",
        "LDR Min. Waarde",
        10,
        100,
        1,
        |s| &s.device.ldr_min,
        |s| &mut s.device.ldr_min,
    )
    .add_number(
        "LDRMaxWaarde",
        "LDR Max. Waarde",
        11,
        101,
        1,
        |s| &s.device.ldr_max,
        |s| &mut s.device.ldr_max,
    )
    .add_number(
        "maxIntensiteitLeds",
        "Max. Intensiteit LEDS",
        10,
        55,
        1,
        |s| &s.device.max_intensity,
        |s| &mut s.device.max_intensity,
    )
    .add_text(
        "skipItems",
        "Words to skip",
        256,
        |s| &s.device.skip_items,
        |s| &mut s.device.skip_items,
    );
    c
}

fn weerlive_container() -> SettingsContainer<DeviceState> {
    let mut c =
        SettingsContainer::<DeviceState>::new("Weerlive Settings", "/weerlive.ini", WEERLIVE_SETTINGS);
    c.add_text(
        "authToken",
        "weerlive Auth. Token",
        16,
        |s| &s.weerlive.auth_token,
        |s| &mut s.weerlive.auth_token,
    )
    .add_text(
        "plaats",
        "Plaats",
        32,
        |s| &s.weerlive.plaats,
        |s| &mut s.weerlive.plaats,
    )
    .add_number(
        "requestInterval",
        "Request Interval (minuten)",
        10,
        120,
        1,
        |s| &s.weerlive.request_interval,
        |s| &mut s.weerlive.request_interval,
    );
    c
}

fn mediastack_container() -> SettingsContainer<DeviceState> {
    let mut c = SettingsContainer::<DeviceState>::new(
        "Mediastack Settings",
        "/Mediastack.ini",
        MEDIASTACK_SETTINGS,
    );
    c.add_text(
        "authToken",
        "mediastack Auth. Token",
        32,
        |s| &s.mediastack.auth_token,
        |s| &mut s.mediastack.auth_token,
    )
    .add_number(
        "maxMessages",
        "Max. Messages to save",
        0,
        50,
        1,
        |s| &s.mediastack.max_messages,
        |s| &mut s.mediastack.max_messages,
    )
    .add_number(
        "requestInterval",
        "Request Interval (minuten)",
        60,
        240,
        1,
        |s| &s.mediastack.request_interval,
        |s| &mut s.mediastack.request_interval,
    )
    .add_flag(
        "onlyDuringDay",
        "Update alleen tussen 08:00 en 18:00",
        |s| &s.mediastack.only_during_day,
        |s| &mut s.mediastack.only_during_day,
    );
    c
}

fn parola_container() -> SettingsContainer<DeviceState> {
    let mut c =
        SettingsContainer::<DeviceState>::new("Parola Settings", "/parola.ini", PAROLA_SETTINGS);
    c.add_number(
        "hardwareType",
        "Type (1=PAROLA_HW, 2=FC16_HW, 3=GENERIC_HW)",
        1,
        3,
        1,
        |s| &s.parola.hardware_type,
        |s| &mut s.parola.hardware_type,
    )
    .add_number(
        "numDevices",
        "Aantal segmenten",
        1,
        22,
        1,
        |s| &s.parola.num_devices,
        |s| &mut s.parola.num_devices,
    )
    .add_number(
        "numZones",
        "Aantal rijen (Zones)",
        1,
        2,
        1,
        |s| &s.parola.num_zones,
        |s| &mut s.parola.num_zones,
    )
    .add_number(
        "pinDIN",
        "DIN/MOSI GPIO pin (0 = default)",
        0,
        15,
        1,
        |s| &s.parola.pin_din,
        |s| &mut s.parola.pin_din,
    )
    .add_number(
        "pinCS",
        "CS/SS GPIO pin (default 5)",
        1,
        15,
        1,
        |s| &s.parola.pin_cs,
        |s| &mut s.parola.pin_cs,
    )
    .add_number(
        "pinCLK",
        "CLK/SCK GPIO pin (0 = default)",
        0,
        15,
        1,
        |s| &s.parola.pin_clk,
        |s| &mut s.parola.pin_clk,
    );
    c
}

fn rssfeed_container() -> SettingsContainer<DeviceState> {
    let mut c =
        SettingsContainer::<DeviceState>::new("RSSfeed Settings", "/rssfeed.ini", RSSFEED_SETTINGS);
    c.add_text(
        "feedUrl0",
        "Feed URL 1",
        256,
        |s| &s.rssfeed.feed_url_0,
        |s| &mut s.rssfeed.feed_url_0,
    )
    .add_text(
        "feedUrl1",
        "Feed URL 2",
        256,
        |s| &s.rssfeed.feed_url_1,
        |s| &mut s.rssfeed.feed_url_1,
    )
    .add_text(
        "feedUrl2",
        "Feed URL 3",
        256,
        |s| &s.rssfeed.feed_url_2,
        |s| &mut s.rssfeed.feed_url_2,
    )
    .add_number(
        "maxItems",
        "Max. items per feed",
        1,
        50,
        1,
        |s| &s.rssfeed.max_items,
        |s| &mut s.rssfeed.max_items,
    )
    .add_number(
        "requestInterval",
        "Request Interval (minuten)",
        10,
        240,
        5,
        |s| &s.rssfeed.request_interval,
        |s| &mut s.rssfeed.request_interval,
    )
    .add_flag(
        "skipDuplicates",
        "Skip duplicate items",
        |s| &s.rssfeed.skip_duplicates,
        |s| &mut s.rssfeed.skip_duplicates,
    );
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_hal_host::RamFileSystem;

    #[test]
    fn test_all_containers_registered() {
        let registry = register_containers(RamFileSystem::new());
        for key in ALL_SETTINGS {
            let container = registry.container(key).unwrap();
            assert_eq!(container.target(), key);
        }
        assert_eq!(registry.keys().count(), ALL_SETTINGS.len());
    }

    #[test]
    fn test_container_files() {
        let registry = register_containers(RamFileSystem::new());
        let file = |key| registry.container(key).unwrap().file().to_string();
        assert_eq!(file(DEVICE_SETTINGS), "/settings.ini");
        assert_eq!(file(WEERLIVE_SETTINGS), "/weerlive.ini");
        assert_eq!(file(MEDIASTACK_SETTINGS), "/Mediastack.ini");
        assert_eq!(file(PAROLA_SETTINGS), "/parola.ini");
        assert_eq!(file(RSSFEED_SETTINGS), "/rssfeed.ini");
    }

    #[test]
    fn test_device_field_order() {
        let registry = register_containers(RamFileSystem::new());
        let names: Vec<_> = registry
            .container(DEVICE_SETTINGS)
            .unwrap()
            .fields()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(
            names,
            [
                "hostname",
                "tickerSpeed",
                "LDRMinWaarde",
                "LDRMaxWaarde",
                "maxIntensiteitLeds",
                "skipItems"
            ]
        );
    }

    #[test]
    fn test_defaults_survive_a_write() {
        let fs = RamFileSystem::new();
        let mut registry = register_containers(fs.clone());
        let mut state = DeviceState::default();
        let defaults = state.clone();
        for key in ALL_SETTINGS {
            assert!(registry.write_setting_fields(key, &mut state));
        }
        assert_eq!(state, defaults);

        let mut loaded = DeviceState::default();
        loaded.device.ticker_speed = 99;
        loaded.mediastack.only_during_day = false;
        for key in ALL_SETTINGS {
            assert!(registry.read_setting_fields(key, &mut loaded));
        }
        assert_eq!(loaded, defaults);
    }
}
