//! A sample object table and publication channel, shared by the
//! demonstration binary and its integration tests (§10.5).
//!
//! Object names, ids, and categories are carried over from a reference
//! data-node table (Manufacturer, `secret_user`/`secret_maker`, `dummy`,
//! the integer-width ladder at `0x6001..0x6008`), addressed here with flat
//! category+id pairs rather than that table's hierarchical path macros.

use thingset_nodes::{Access, Category, ObjectDescriptor, ObjectTable, PublicationChannel, Slot};
use thingset_types::{ScalarType, TypeTag, Value};

pub fn build_table() -> ObjectTable {
    ObjectTable::new(vec![
        ObjectDescriptor {
            id: 0x19,
            category: Category::Info,
            access: Access::READ,
            type_tag: TypeTag::Scalar(ScalarType::Text),
            detail: 0,
            name: "Manufacturer",
            slot: Slot::scalar(Value::Text("Libre Solar".into())),
        },
        ObjectDescriptor {
            id: 0x6004,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::I32),
            detail: 0,
            name: "i32",
            slot: Slot::scalar(Value::I32(0)),
        },
        ObjectDescriptor {
            id: 0x6007,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::F32),
            detail: 2,
            name: "f32",
            slot: Slot::scalar(Value::F32(0.0)),
        },
        ObjectDescriptor {
            id: 0x6001,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::U64),
            detail: 0,
            name: "ui64",
            slot: Slot::scalar(Value::U64(0)),
        },
        ObjectDescriptor {
            id: 0x6002,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::I64),
            detail: 0,
            name: "i64",
            slot: Slot::scalar(Value::I64(0)),
        },
        ObjectDescriptor {
            id: 0x6005,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::U16),
            detail: 0,
            name: "ui16",
            slot: Slot::scalar(Value::U16(0)),
        },
        ObjectDescriptor {
            id: 0x6006,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::I16),
            detail: 0,
            name: "i16",
            slot: Slot::scalar(Value::I16(0)),
        },
        ObjectDescriptor {
            id: 0x6008,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::Bool),
            detail: 0,
            name: "bool",
            slot: Slot::scalar(Value::Bool(false)),
        },
        ObjectDescriptor {
            id: 0x7001,
            category: Category::Conf,
            access: Access::READ.union(Access::WRITE_AUTH),
            type_tag: TypeTag::Scalar(ScalarType::U32),
            detail: 0,
            name: "secret_user",
            slot: Slot::scalar(Value::U32(1)),
        },
        ObjectDescriptor {
            id: 0x7002,
            category: Category::Conf,
            access: Access::READ.union(Access::WRITE_MAKER),
            type_tag: TypeTag::Scalar(ScalarType::U32),
            detail: 0,
            name: "secret_maker",
            slot: Slot::scalar(Value::U32(2)),
        },
        ObjectDescriptor {
            id: 0x4001,
            category: Category::Output,
            access: Access::READ,
            type_tag: TypeTag::Scalar(ScalarType::I32),
            detail: 0,
            name: "i32_output",
            slot: Slot::scalar(Value::I32(0)),
        },
        ObjectDescriptor {
            id: 0x61,
            category: Category::Input,
            access: Access::READ,
            type_tag: TypeTag::Scalar(ScalarType::Bool),
            detail: 0,
            name: "loadEnTarget",
            slot: Slot::scalar(Value::Bool(false)),
        },
        ObjectDescriptor {
            id: 0x62,
            category: Category::Input,
            access: Access::READ,
            type_tag: TypeTag::Scalar(ScalarType::Bool),
            detail: 0,
            name: "usbEnTarget",
            slot: Slot::scalar(Value::Bool(false)),
        },
        ObjectDescriptor {
            id: 0x5001,
            category: Category::Exec,
            access: Access::EXEC,
            type_tag: TypeTag::Scalar(ScalarType::Bool),
            detail: 0,
            name: "dummy",
            slot: Slot::exec(|| log::debug!("dummy callback invoked")),
        },
    ])
}

pub fn build_channels() -> Vec<PublicationChannel> {
    vec![PublicationChannel::new("Serial_1s", vec![0x6004, 0x6007], true)]
}
