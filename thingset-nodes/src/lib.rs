//! Data object descriptors, the object table, access bits, and publication
//! channels (§3, §4.3).

pub mod access;
pub mod category;
pub mod channel;
pub mod descriptor;
pub mod table;

pub use access::Access;
pub use category::Category;
pub use channel::PublicationChannel;
pub use descriptor::{ObjectDescriptor, Slot};
pub use table::ObjectTable;
