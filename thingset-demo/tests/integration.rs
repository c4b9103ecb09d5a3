//! End-to-end request/response scenarios and cross-cutting property
//! checks driven entirely through `Engine::process`, mirroring how an
//! embedder's transport loop would exercise the engine.

use std::cell::Cell;
use std::rc::Rc;

use thingset_core::EngineLimits;
use thingset_demo::{build_channels, build_table};
use thingset_engine::Engine;
use thingset_nodes::{Access, Category, ObjectDescriptor, ObjectTable, PublicationChannel, Slot};
use thingset_types::{binary, ScalarType, StatusCode, TypeTag};

fn demo_engine() -> Engine {
    let mut engine = Engine::new(build_table(), build_channels(), EngineLimits::default());
    engine.set_user_password("user123");
    engine.set_maker_password("maker456");
    engine
}

fn process(engine: &Engine, req: &[u8]) -> String {
    let mut resp = [0u8; 256];
    let n = engine.process(req, &mut resp);
    String::from_utf8_lossy(&resp[..n]).into_owned()
}

#[test]
fn text_array_write_truncates_and_reports_changed() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!conf {"f32":52.8,"i32":50.6}"#);
    assert_eq!(reply, ":84 Changed.");

    let reply = process(&engine, br#"!conf {}"#);
    assert!(reply.contains(r#""f32":52.80"#));
    assert!(reply.contains(r#""i32":50"#));
}

#[test]
fn text_write_to_read_only_object_is_unauthorized() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!output {"i32_output":52}"#);
    assert_eq!(reply, ":A1 Unauthorized.");
}

#[test]
fn text_list_with_values_renders_name_value_map() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!input {}"#);
    assert_eq!(reply, r#":85 Content. {"loadEnTarget":false,"usbEnTarget":false}"#);
}

#[test]
fn text_execute_invokes_callback_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let calls_clone = calls.clone();
    let table = ObjectTable::new(vec![ObjectDescriptor {
        id: 0x5001,
        category: Category::Exec,
        access: Access::EXEC,
        type_tag: TypeTag::Scalar(ScalarType::Bool),
        detail: 0,
        name: "dummy",
        slot: Slot::exec(move || calls_clone.set(calls_clone.get() + 1)),
    }]);
    let engine = Engine::new(table, Vec::<PublicationChannel>::new(), EngineLimits::default());

    let reply = process(&engine, br#"!exec "dummy""#);
    assert_eq!(reply, ":83 Valid.");
    assert_eq!(calls.get(), 1);
}

/// A `user`-level session can write the user-tier secret, but the
/// maker-tier secret stays out of reach until the session authenticates
/// as `maker` specifically.
#[test]
fn user_level_auth_unlocks_only_the_user_tier_secret() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!auth "user123""#);
    assert_eq!(reply, ":83 Valid.");

    let reply = process(&engine, br#"!conf {"secret_user":10}"#);
    assert_eq!(reply, ":84 Changed.");

    let reply = process(&engine, br#"!conf {"secret_maker":10}"#);
    assert_eq!(reply, ":A1 Unauthorized.");
}

/// A `maker`-level session can write both the user-tier and the
/// maker-tier secret.
#[test]
fn maker_level_auth_unlocks_both_secret_objects() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!auth "maker456""#);
    assert_eq!(reply, ":83 Valid.");

    let reply = process(&engine, br#"!conf {"secret_user":10}"#);
    assert_eq!(reply, ":84 Changed.");

    let reply = process(&engine, br#"!conf {"secret_maker":10}"#);
    assert_eq!(reply, ":84 Changed.");
}

#[test]
fn wrong_password_resets_session_and_denies_auth_gated_write() {
    let engine = demo_engine();
    let reply = process(&engine, br#"!auth "wrong""#);
    assert_eq!(reply, ":A9 Conflict.");

    let reply = process(&engine, br#"!conf {"secret_user":10}"#);
    assert_eq!(reply, ":A1 Unauthorized.");
}

/// The id 25 (`Manufacturer`) needs a follow-on byte under genuine minimal
/// CBOR, so it is encoded here with `encode_uint` rather than transcribed
/// as a literal single-byte value.
#[test]
fn binary_read_of_manufacturer_returns_encoded_text() {
    let engine = demo_engine();
    let mut req = [0u8; 4];
    req[0] = Category::Info.binary_code();
    let id_len = binary::encode_uint(&mut req[1..], 0x19).unwrap();
    let req = &req[..1 + id_len];

    let mut resp = [0u8; 32];
    let n = engine.process(req, &mut resp);

    let mut expected = [0u8; 32];
    expected[0] = 0x80;
    let text_len = binary::encode_text(&mut expected[1..], "Libre Solar").unwrap();
    assert_eq!(&resp[..n], &expected[..1 + text_len]);
}

#[test]
fn publish_channel_emits_configured_objects_as_text() {
    let engine = demo_engine();
    let mut resp = [0u8; 128];
    let n = engine.publish_channel(0, thingset_engine::Encoding::Text, &mut resp);
    let rendered = String::from_utf8_lossy(&resp[..n]);
    assert!(rendered.starts_with('#'));
    assert!(rendered.contains("\"i32\":0"));
    assert!(rendered.contains("\"f32\":0.00"));
}

#[test]
fn publish_channel_out_of_range_index_yields_zero_length() {
    let engine = demo_engine();
    let mut resp = [0u8; 128];
    assert_eq!(engine.publish_channel(99, thingset_engine::Encoding::Text, &mut resp), 0);
}

/// A fresh table built by `build_table` has no duplicate ids — the
/// precondition every other scenario in this file relies on implicitly.
#[test]
fn demo_table_has_no_duplicate_ids() {
    assert!(build_table().duplicate_ids().is_empty());
}

/// Table-driven universal property (§10.4): a failed write never leaves
/// a partial value behind, and never changes the session's auth level.
#[test]
fn failed_write_has_no_side_effect() {
    let cases: [&[u8]; 2] = [
        br#"!conf {"i32":"not a number"}"#,
        br#"!conf {"missing_object":1}"#,
    ];
    for req in cases {
        let engine = demo_engine();
        let before = process(&engine, br#"!conf {}"#);
        let reply = process(&engine, req);
        assert!(!reply.starts_with(":8"), "expected an error reply for {req:?}, got {reply}");
        let after = process(&engine, br#"!conf {}"#);
        assert_eq!(before, after, "a rejected write must not mutate any object");
    }
}

/// Table-driven universal property (§10.4): access is monotonic in auth
/// level — whatever a `none`-level session can write, a `user`-level
/// session can also write, for every `-auth`-gated object in the demo
/// table that isn't also maker-exclusive.
#[test]
fn access_is_monotonic_in_auth_level() {
    let targets = ["secret_user"];
    for name in targets {
        let none_engine = demo_engine();
        let user_engine = demo_engine();
        process(&user_engine, br#"!auth "user123""#);

        let request = format!(r#"!conf {{"{name}":7}}"#);
        let none_reply = process(&none_engine, request.as_bytes());
        let user_reply = process(&user_engine, request.as_bytes());
        assert_eq!(none_reply, ":A1 Unauthorized.", "a none-level session must not write {name}");
        assert_eq!(user_reply, ":84 Changed.", "a user-level session must be able to write {name}");
    }
}

/// The maker-exclusive tier breaks monotonicity by design: `none` and
/// `user` both fail to write `secret_maker`, and only `maker` succeeds.
#[test]
fn maker_exclusive_write_rejects_none_and_user_alike() {
    for password in [None, Some("user123")] {
        let engine = demo_engine();
        if let Some(password) = password {
            let line = format!(r#"!auth "{password}""#);
            process(&engine, line.as_bytes());
        }
        let reply = process(&engine, br#"!conf {"secret_maker":7}"#);
        assert_eq!(reply, ":A1 Unauthorized.", "password {password:?} must not unlock secret_maker");
    }

    let engine = demo_engine();
    process(&engine, br#"!auth "maker456""#);
    let reply = process(&engine, br#"!conf {"secret_maker":7}"#);
    assert_eq!(reply, ":84 Changed.");
}

/// A binary read declaring an array count far past `max_array_elements`
/// (here 1000 against the default of 32) must yield a controlled error
/// reply rather than attempt the allocation.
#[test]
fn binary_read_with_oversized_array_count_is_rejected_not_allocated() {
    let engine = demo_engine();
    let mut req = [0u8; 16];
    req[0] = Category::Conf.binary_code();
    let n = binary::encode_array_header(&mut req[1..], 1000).unwrap();
    let req = &req[..1 + n];

    let mut resp = [0u8; 8];
    let reply_len = engine.process(req, &mut resp);
    assert_eq!(&resp[..reply_len], &[StatusCode::RequestTooLong.binary_byte()]);
}

/// A binary write to an array-typed object declaring a count far past
/// `max_array_elements` must likewise fail in a controlled way.
#[test]
fn binary_write_with_oversized_array_count_is_rejected_not_allocated() {
    let table = ObjectTable::new(vec![ObjectDescriptor {
        id: 0x9001,
        category: Category::Conf,
        access: Access::ANY_RW,
        type_tag: TypeTag::Array(ScalarType::I32),
        detail: 0,
        name: "big_array",
        slot: Slot::scalar(thingset_types::Value::Array(Vec::new())),
    }]);
    let engine = Engine::new(table, Vec::<PublicationChannel>::new(), EngineLimits::default());

    let mut req = [0u8; 16];
    req[0] = Category::Conf.binary_code();
    let mut off = 1;
    off += binary::encode_map_header(&mut req[off..], 1).unwrap();
    off += binary::encode_uint(&mut req[off..], 0x9001).unwrap();
    off += binary::encode_array_header(&mut req[off..], 1000).unwrap();
    let req = &req[..off];

    let mut resp = [0u8; 8];
    let reply_len = engine.process(req, &mut resp);
    assert_eq!(&resp[..reply_len], &[StatusCode::InvalidValue.binary_byte()]);
}

/// A text write whose object name exceeds `max_name_len` (here 40 bytes
/// against the default of 32) is rejected before the table is even
/// searched for that name.
#[test]
fn text_write_with_overlong_name_is_rejected() {
    let engine = demo_engine();
    let overlong_name = "x".repeat(40);
    let request = format!(r#"!conf {{"{overlong_name}":1}}"#);
    let reply = process(&engine, request.as_bytes());
    assert_eq!(reply, ":A9 Invalid Value.");
}

/// A text read of an overlong name is likewise rejected rather than
/// falling through to an unknown-object lookup.
#[test]
fn text_read_with_overlong_name_is_rejected() {
    let engine = demo_engine();
    let overlong_name = "x".repeat(40);
    let request = format!(r#"!conf "{overlong_name}""#);
    let reply = process(&engine, request.as_bytes());
    assert_eq!(reply, ":A9 Invalid Value.");
}
