//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements      | Connects to                   |
//! |----------------|-----------------|-------------------------------|
//! | `log_sink`     | EventSink       | Serial log output             |
//! | `status_board` | StatusReporter  | `/oic/prov`, `/oic/net` bodies |
//! | `time`         | Clock           | ESP32 system timer            |
//! | `wifi`         | RadioDriver     | ESP-IDF WiFi STA / simulation |

pub mod log_sink;
pub mod status_board;
pub mod time;
pub mod wifi;
