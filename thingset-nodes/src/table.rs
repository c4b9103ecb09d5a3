//! Read-only indexed registry of data-object descriptors (§4.3).

use crate::category::Category;
use crate::descriptor::ObjectDescriptor;

/// A statically known object table. Ids and names are assumed unique by
/// construction (§3 Invariants); the engine never mutates the table after
/// construction, so lookup is a plain linear scan — tables are small
/// enough that hashing would be overhead, not a speedup.
pub struct ObjectTable {
    objects: Vec<ObjectDescriptor>,
}

impl ObjectTable {
    pub fn new(objects: Vec<ObjectDescriptor>) -> Self {
        ObjectTable { objects }
    }

    pub fn by_id(&self, id: u16) -> Option<&ObjectDescriptor> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Name lookup is exact: a match requires the full stored name, not a
    /// prefix (§4.3 "Name equality is exact").
    pub fn by_name(&self, name: &str) -> Option<&ObjectDescriptor> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ObjectDescriptor> {
        self.objects.iter().filter(move |o| o.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectDescriptor> {
        self.objects.iter()
    }

    /// Detects duplicate ids at construction; the ambient logging layer
    /// (§10.2) treats this as a misconfigured-embedder condition.
    pub fn duplicate_ids(&self) -> Vec<u16> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for obj in &self.objects {
            if !seen.insert(obj.id) {
                dupes.push(obj.id);
            }
        }
        dupes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Access;
    use crate::descriptor::Slot;
    use thingset_types::{ScalarType, TypeTag, Value};

    fn table() -> ObjectTable {
        ObjectTable::new(vec![
            ObjectDescriptor {
                id: 1,
                category: Category::Conf,
                access: Access::ANY_RW,
                type_tag: TypeTag::Scalar(ScalarType::I32),
                detail: 0,
                name: "i32",
                slot: Slot::scalar(Value::I32(0)),
            },
            ObjectDescriptor {
                id: 2,
                category: Category::Conf,
                access: Access::ANY_RW,
                type_tag: TypeTag::Scalar(ScalarType::F32),
                detail: 2,
                name: "f32",
                slot: Slot::scalar(Value::F32(0.0)),
            },
        ])
    }

    #[test]
    fn looks_up_by_id_and_name() {
        let t = table();
        assert_eq!(t.by_id(1).unwrap().name, "i32");
        assert_eq!(t.by_name("f32").unwrap().id, 2);
        assert!(t.by_id(99).is_none());
        assert!(t.by_name("missing").is_none());
    }

    #[test]
    fn name_lookup_requires_exact_match() {
        let t = table();
        assert!(t.by_name("i3").is_none());
        assert!(t.by_name("i32x").is_none());
    }

    #[test]
    fn detects_duplicate_ids() {
        let dup_table = ObjectTable::new(vec![
            ObjectDescriptor {
                id: 1,
                category: Category::Conf,
                access: Access::ANY_RW,
                type_tag: TypeTag::Scalar(ScalarType::I32),
                detail: 0,
                name: "a",
                slot: Slot::scalar(Value::I32(0)),
            },
            ObjectDescriptor {
                id: 1,
                category: Category::Conf,
                access: Access::ANY_RW,
                type_tag: TypeTag::Scalar(ScalarType::I32),
                detail: 0,
                name: "b",
                slot: Slot::scalar(Value::I32(0)),
            },
        ]);
        assert_eq!(dup_table.duplicate_ids(), vec![1]);
    }
}
