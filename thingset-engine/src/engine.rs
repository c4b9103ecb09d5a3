//! The top-level engine (§3, §5, §7): owns the object table, the session,
//! and the publication channels, and exposes the two entry points an
//! embedder drives — `process` for request/response, `publish_*` for
//! transport-scheduled emission.

use thingset_core::{EngineError, EngineLimits};
use thingset_nodes::{ObjectTable, PublicationChannel};
use thingset_types::{StatusCode, Value};

use crate::classify::{self, Encoding, OperationKind};
use crate::handlers;
use crate::publish;
use crate::session::{AuthLevel, Session};
use crate::wire;

pub struct Engine {
    table: ObjectTable,
    channels: Vec<PublicationChannel>,
    session: Session,
    limits: EngineLimits,
    conf_callback: Option<Box<dyn Fn()>>,
}

impl Engine {
    pub fn new(table: ObjectTable, channels: Vec<PublicationChannel>, limits: EngineLimits) -> Self {
        let duplicates = table.duplicate_ids();
        if !duplicates.is_empty() {
            log::error!("object table has duplicate ids: {duplicates:?}");
        }
        Engine { table, channels, session: Session::new(), limits, conf_callback: None }
    }

    pub fn table(&self) -> &ObjectTable {
        &self.table
    }

    pub fn auth_level(&self) -> AuthLevel {
        self.session.level()
    }

    pub fn set_user_password(&mut self, password: impl Into<String>) {
        self.session.set_user_password(password);
    }

    pub fn set_maker_password(&mut self, password: impl Into<String>) {
        self.session.set_maker_password(password);
    }

    /// Installs the callback run once after a successful `conf` write
    /// (§4.6 "Write"), e.g. to persist the new values.
    pub fn set_conf_callback(&mut self, callback: impl Fn() + 'static) {
        self.conf_callback = Some(Box::new(callback));
    }

    /// Writes `value` into object `id` bypassing the access check —
    /// an internal API only, for an embedder's own startup-restore flow
    /// (§4.4). Never reachable from `process`.
    pub fn restore_object(&self, id: u16, value: Value) -> Result<(), EngineError> {
        let obj = self.table.by_id(id).ok_or(EngineError::UnknownDataObject)?;
        obj.write(value)
    }

    /// Handles one request, writing a complete response into `resp` and
    /// returning its length. Returns 0 if the request isn't addressed to
    /// this engine at all (§4.5 "not for me").
    pub fn process(&self, req: &[u8], resp: &mut [u8]) -> usize {
        let Some(&first) = req.first() else {
            return 0;
        };
        if first <= thingset_nodes::Category::Exec.binary_code() {
            return match self.process_binary(req, resp) {
                Ok(n) => n,
                Err(e) => {
                    log::warn!("binary request rejected: {e}");
                    wire::write_binary_error(resp, e.status())
                }
            };
        }
        if first == b'!' {
            return match std::str::from_utf8(req) {
                Ok(text_req) => match self.process_text(text_req, resp) {
                    Ok(n) => n,
                    Err(e) => {
                        log::warn!("text request rejected: {e}");
                        wire::write_text_error(resp, e.status())
                    }
                },
                Err(_) => wire::write_text_error(resp, StatusCode::WrongFormat),
            };
        }
        0
    }

    fn process_binary(&self, req: &[u8], resp: &mut [u8]) -> Result<usize, EngineError> {
        let (category, operation) = classify::classify_binary(req)?;
        let argument = &req[1..];
        let level = self.session.level();
        match operation {
            OperationKind::List => {
                let (style, _) = thingset_types::binary::decode_list_marker(argument)
                    .ok_or_else(|| thingset_types::CodecError::Malformed("expected a list marker"))?;
                handlers::list::list_binary(&self.table, category, style, level, resp)
            }
            OperationKind::Read => handlers::read::read_binary(&self.table, argument, level, &self.limits, resp),
            OperationKind::Write => handlers::write::write_binary(
                &self.table,
                argument,
                level,
                category,
                &self.conf_callback,
                &self.limits,
                resp,
            ),
            OperationKind::Execute => handlers::execute::execute_binary(&self.table, argument, level, resp),
            OperationKind::Authenticate | OperationKind::Publish => {
                Err(EngineError::Internal("auth and pub have no binary function code"))
            }
        }
    }

    fn process_text(&self, req: &str, resp: &mut [u8]) -> Result<usize, EngineError> {
        let (category, operation, payload) = classify::classify_text(req)?;
        let level = self.session.level();
        match operation {
            OperationKind::List => handlers::list::list_text(&self.table, category, payload, level, resp),
            OperationKind::Read => handlers::read::read_text(&self.table, payload, level, &self.limits, resp),
            OperationKind::Write => {
                handlers::write::write_text(&self.table, payload, level, category, &self.conf_callback, &self.limits, resp)
            }
            OperationKind::Execute => handlers::execute::execute_text(&self.table, payload, level, &self.limits, resp),
            OperationKind::Authenticate => handlers::auth::auth_text(&self.session, payload, &self.limits, resp),
            OperationKind::Publish => {
                handlers::publish::pub_text(&self.channels, payload, self.limits.max_text_tokens, resp)
            }
        }
    }

    /// Emits a configured channel's object list by index. Out-of-range
    /// indices, codec overflow, and buffer overflow all yield 0 rather
    /// than an error reply (§4.7).
    pub fn publish_channel(&self, channel_index: usize, encoding: Encoding, out: &mut [u8]) -> usize {
        let Some(channel) = self.channels.get(channel_index) else {
            return 0;
        };
        self.publish_ids(&channel.object_ids, encoding, out)
    }

    /// The supplementary ad-hoc variant (§4.7): an explicit id list instead
    /// of a configured channel.
    pub fn publish_ids(&self, ids: &[u16], encoding: Encoding, out: &mut [u8]) -> usize {
        publish::publish_ids(&self.table, ids, self.session.level(), encoding, out)
    }
}
