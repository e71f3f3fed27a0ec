//! Device configuration state
//!
//! Every live setting of the ticker, grouped per feature. The settings
//! registry binds to these fields; nothing else owns a copy.

/// Display and sensor settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    pub hostname: String,
    /// Scroll delay per column
    pub ticker_speed: i32,
    pub ldr_min: i32,
    pub ldr_max: i32,
    pub max_intensity: i32,
    /// Words that cause a feed item to be skipped, space separated
    pub skip_items: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            // Empty until boot fills in the configured default
            hostname: String::new(),
            ticker_speed: 25,
            ldr_min: 10,
            ldr_max: 101,
            max_intensity: 40,
            skip_items: String::new(),
        }
    }
}

/// Weerlive weather feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeerliveSettings {
    pub auth_token: String,
    pub plaats: String,
    /// Minutes between requests
    pub request_interval: i32,
}

impl Default for WeerliveSettings {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            plaats: String::from("Amsterdam"),
            request_interval: 15,
        }
    }
}

/// Mediastack news feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediastackSettings {
    pub auth_token: String,
    pub max_messages: i32,
    /// Minutes between requests
    pub request_interval: i32,
    pub only_during_day: bool,
}

impl Default for MediastackSettings {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            max_messages: 20,
            request_interval: 120,
            only_during_day: true,
        }
    }
}

/// LED matrix wiring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParolaSettings {
    /// 1 = PAROLA_HW, 2 = FC16_HW, 3 = GENERIC_HW
    pub hardware_type: i32,
    pub num_devices: i32,
    pub num_zones: i32,
    /// 0 selects the board default
    pub pin_din: i32,
    pub pin_cs: i32,
    /// 0 selects the board default
    pub pin_clk: i32,
}

impl Default for ParolaSettings {
    fn default() -> Self {
        Self {
            hardware_type: 2,
            num_devices: 8,
            num_zones: 1,
            pin_din: 0,
            pin_cs: 5,
            pin_clk: 0,
        }
    }
}

/// RSS feeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssfeedSettings {
    pub feed_url_0: String,
    pub feed_url_1: String,
    pub feed_url_2: String,
    pub max_items: i32,
    /// Minutes between requests
    pub request_interval: i32,
    pub skip_duplicates: bool,
}

impl Default for RssfeedSettings {
    fn default() -> Self {
        Self {
            feed_url_0: String::new(),
            feed_url_1: String::new(),
            feed_url_2: String::new(),
            max_items: 10,
            request_interval: 60,
            skip_duplicates: true,
        }
    }
}

/// All configuration of the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    pub device: DeviceSettings,
    pub weerlive: WeerliveSettings,
    pub mediastack: MediastackSettings,
    pub parola: ParolaSettings,
    pub rssfeed: RssfeedSettings,
}
