//! Data object descriptor and its mutable slot (§3).
//!
//! Grounded on `opcua_nodes::base::Base` for the descriptor shape and
//! `opcua_nodes::node::Node::set_attribute`'s match-and-typecheck pattern,
//! generalized from OPC-UA's many attribute IDs down to this spec's single
//! typed scalar (or homogeneous array) per object.

use std::cell::RefCell;
use std::fmt;

use thingset_core::EngineError;
use thingset_types::{CodecError, TypeTag, Value};

use crate::access::Access;
use crate::category::Category;

/// Where a descriptor's value actually lives. Exec objects carry a
/// parameterless callback instead of a value, per spec.md §9 "Callbacks as
/// exec": a distinct variant of the descriptor sum type rather than a cast
/// function pointer.
pub enum Slot {
    Scalar(RefCell<Value>),
    Exec(Box<dyn Fn()>),
}

impl Slot {
    pub fn scalar(initial: Value) -> Slot {
        Slot::Scalar(RefCell::new(initial))
    }

    pub fn exec(callback: impl Fn() + 'static) -> Slot {
        Slot::Exec(Box::new(callback))
    }
}

/// Immutable metadata plus a mutable value slot for one data object.
///
/// The engine is single-threaded and strictly synchronous (§5), so the slot
/// uses a plain `RefCell` rather than an `Arc<RwLock<_>>` — there is no
/// concurrent access to guard against.
pub struct ObjectDescriptor {
    pub id: u16,
    pub category: Category,
    pub access: Access,
    pub type_tag: TypeTag,
    /// Type-dependent: decimal exponent, float/decimal rendering precision,
    /// or text-slot capacity (§3).
    pub detail: u8,
    pub name: &'static str,
    pub slot: Slot,
}

impl fmt::Debug for ObjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDescriptor")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("name", &self.name)
            .field("access", &self.access)
            .finish()
    }
}

impl ObjectDescriptor {
    pub fn read(&self) -> Result<Value, EngineError> {
        match &self.slot {
            Slot::Scalar(cell) => Ok(cell.borrow().clone()),
            Slot::Exec(_) => Err(EngineError::WrongCategory),
        }
    }

    /// Writes `value` into the slot, checking shape against `type_tag` and,
    /// for text slots, against the `detail`-declared capacity (spec.md §3
    /// "Text slots have a fixed capacity; over-long writes are invalid-value").
    pub fn write(&self, value: Value) -> Result<(), EngineError> {
        let Slot::Scalar(cell) = &self.slot else {
            return Err(EngineError::WrongCategory);
        };
        if !value.matches_type(self.type_tag) {
            return Err(CodecError::TypeMismatch { expected: self.type_tag }.into());
        }
        if let Value::Text(text) = &value {
            if text.len() > self.detail as usize {
                return Err(CodecError::OutOfRange.into());
            }
        }
        *cell.borrow_mut() = value;
        Ok(())
    }

    pub fn invoke(&self) -> Result<(), EngineError> {
        match &self.slot {
            Slot::Exec(callback) => {
                callback();
                Ok(())
            }
            Slot::Scalar(_) => Err(EngineError::WrongCategory),
        }
    }

    pub fn is_exec(&self) -> bool {
        matches!(self.slot, Slot::Exec(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thingset_types::ScalarType;

    fn i32_object() -> ObjectDescriptor {
        ObjectDescriptor {
            id: 0x6004,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::I32),
            detail: 0,
            name: "i32",
            slot: Slot::scalar(Value::I32(0)),
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let obj = i32_object();
        obj.write(Value::I32(42)).unwrap();
        assert_eq!(obj.read().unwrap(), Value::I32(42));
    }

    #[test]
    fn wrong_type_write_is_rejected() {
        let obj = i32_object();
        assert!(obj.write(Value::Bool(true)).is_err());
    }

    #[test]
    fn overlong_text_write_is_invalid_value() {
        let obj = ObjectDescriptor {
            id: 1,
            category: Category::Conf,
            access: Access::ANY_RW,
            type_tag: TypeTag::Scalar(ScalarType::Text),
            detail: 4,
            name: "name",
            slot: Slot::scalar(Value::Text(String::new())),
        };
        assert!(obj.write(Value::Text("ok".into())).is_ok());
        assert!(obj.write(Value::Text("toolong".into())).is_err());
    }

    #[test]
    fn exec_invokes_callback_exactly_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let obj = ObjectDescriptor {
            id: 0x5001,
            category: Category::Exec,
            access: Access::EXEC,
            type_tag: TypeTag::Scalar(ScalarType::Bool),
            detail: 0,
            name: "dummy",
            slot: Slot::exec(move || calls_clone.set(calls_clone.get() + 1)),
        };
        obj.invoke().unwrap();
        assert_eq!(calls.get(), 1);
    }
}
