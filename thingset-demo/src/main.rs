//! A runnable demonstration of the engine: builds a small object table and
//! publication channel, then drives a handful of requests through
//! `Engine::process` the way an embedder's transport loop would.

use thingset_core::EngineLimits;
use thingset_demo::{build_channels, build_table};
use thingset_engine::Engine;

fn main() {
    env_logger::init();

    let mut engine = Engine::new(build_table(), build_channels(), EngineLimits::default());
    engine.set_user_password("user123");
    engine.set_maker_password("maker456");

    let mut resp = [0u8; 256];

    let n = engine.process(br#"!conf {"f32":52.8,"i32":50.6}"#, &mut resp);
    log::info!("conf write -> {}", String::from_utf8_lossy(&resp[..n]));

    let n = engine.process(br#"!input {}"#, &mut resp);
    log::info!("input list -> {}", String::from_utf8_lossy(&resp[..n]));

    let n = engine.process(br#"!exec "dummy""#, &mut resp);
    log::info!("exec -> {}", String::from_utf8_lossy(&resp[..n]));

    let n = engine.publish_channel(0, thingset_engine::Encoding::Text, &mut resp);
    log::info!("publish -> {}", String::from_utf8_lossy(&resp[..n]));
}
