//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to                 |
//! |------------|---------------------|-----------------------------|
//! | `hardware` | TriggerPort         | ISR latches, trim ADC       |
//! |            | OutputPort          | Indicator GPIO, relay GPIO  |
//! | `log_sink` | EventSink           | Serial log output           |
//! | `time`     | DelayNs + Clock     | FreeRTOS delay, ESP timer   |

pub mod hardware;
pub mod log_sink;
pub mod time;
