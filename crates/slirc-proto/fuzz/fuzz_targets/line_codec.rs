//! Fuzz target for the line codec
//!
//! Feeds arbitrary bytes split at an arbitrary point and checks that no
//! decoded line contains the terminator.

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use slirc_proto::LineCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let cut = data[0] as usize % data.len();
    let mut codec = LineCodec::new();
    let mut buf = BytesMut::new();

    for chunk in [&data[..cut], &data[cut..]] {
        buf.extend_from_slice(chunk);
        loop {
            match codec.decode(&mut buf) {
                Ok(Some(line)) => assert!(!line.contains("\r\n")),
                Ok(None) | Err(_) => break,
            }
        }
    }
});
