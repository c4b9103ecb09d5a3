//! Publication channels (§3, §4.7).

use std::cell::Cell;

/// A named channel with an immutable object-id list and a mutable
/// `enabled` flag. The engine owns the flag; the transport owns emission
/// cadence (spec.md §3 "Publication channel").
pub struct PublicationChannel {
    pub name: &'static str,
    pub object_ids: Vec<u16>,
    enabled: Cell<bool>,
}

impl PublicationChannel {
    pub fn new(name: &'static str, object_ids: Vec<u16>, enabled: bool) -> Self {
        PublicationChannel { name, object_ids, enabled: Cell::new(enabled) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, value: bool) {
        self.enabled.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_flag_is_mutable_through_shared_reference() {
        let channel = PublicationChannel::new("Serial_1s", vec![1, 2], false);
        assert!(!channel.is_enabled());
        channel.set_enabled(true);
        assert!(channel.is_enabled());
    }
}
