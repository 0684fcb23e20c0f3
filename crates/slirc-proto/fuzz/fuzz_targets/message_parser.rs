//! Fuzz target for IRC message parsing
//!
//! Parsing must never panic, must only reject the empty line, and must give
//! the same result twice for the same input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 8191 {
            return;
        }

        match slirc_proto::Message::parse(input) {
            Ok(msg) => {
                assert!(!input.is_empty());
                assert_eq!(Some(msg), slirc_proto::Message::parse(input).ok());
            }
            Err(_) => assert!(input.is_empty()),
        }

        let sanitized = slirc_proto::LineCodec::sanitize(input);
        assert!(sanitized.len() <= slirc_proto::MAX_OUTBOUND_PAYLOAD);
        assert!(!sanitized.contains(['\r', '\n']));
    }
});
