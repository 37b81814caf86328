#![no_main]

use libfuzzer_sys::fuzz_target;
use tic_rs::tic::detect::matches_line_shape;
use tic_rs::tic::frame::read_frame;
use tic_rs::{TicMode, TicReading};
use tokio::io::BufReader;

fuzz_target!(|data: &[u8]| {
    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(_) => return,
    };

    // Any byte stream either fails cleanly or yields a frame both schemas accept
    let frame = runtime.block_on(async {
        let mut reader = BufReader::new(data);
        read_frame(&mut reader).await
    });
    if let Ok(frame) = frame {
        let _ = TicReading::decode(TicMode::Historical, &frame);
        let _ = TicReading::decode(TicMode::Standard, &frame);
    }

    for line in String::from_utf8_lossy(data).lines() {
        let _ = matches_line_shape(line);
    }
});
