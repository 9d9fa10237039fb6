//! Deriving loggers that carry call-site and request metadata.
//!
//! ```ignore
//! let log = logging::wrap(&log, [
//!     logging::with_op(concat!(module_path!(), "::create_widget")),
//!     logging::with_ctx(&ctx),
//!     logging::with_attr("widget_id", id),
//! ]);
//! log.info("created", []);
//! ```

use serde_json::Value;

use crate::context::{RequestContext, REQUEST_ID_KEY, USERNAME_KEY};
use crate::logging::{Attr, Logger};

/// Attribute key for the operation name.
pub const OP_KEY: &str = "op";

/// One enrichment requested from [`wrap`].
#[derive(Debug, Clone)]
pub enum WrapOption {
    /// Tag records with the operation that emits them.
    Op(String),
    /// Tag records with request correlation data.
    Ctx(RequestContext),
    /// Tag records with an arbitrary attribute.
    Attr(Attr),
}

pub fn with_op(op: impl Into<String>) -> WrapOption {
    WrapOption::Op(op.into())
}

pub fn with_ctx(ctx: &RequestContext) -> WrapOption {
    WrapOption::Ctx(ctx.clone())
}

pub fn with_attr(key: impl Into<String>, value: impl Into<Value>) -> WrapOption {
    WrapOption::Attr(Attr::new(key, value))
}

/// Derive a logger from `log` that attaches the requested metadata to every
/// record.
///
/// Attributes are laid down as `op`, then `request_id` and `username`, then
/// explicit attributes in the order given, whatever order the options arrive
/// in. On a key collision the later one wins. Attributes `log` already carries
/// are kept unless shadowed.
pub fn wrap(log: &Logger, options: impl IntoIterator<Item = WrapOption>) -> Logger {
    let mut op = None;
    let mut ctx = None;
    let mut explicit = Vec::new();

    for option in options {
        match option {
            WrapOption::Op(name) => op = Some(name),
            WrapOption::Ctx(value) => ctx = Some(value),
            WrapOption::Attr(attr) => upsert(&mut explicit, attr),
        }
    }

    let mut attrs = Vec::with_capacity(3 + explicit.len());
    if let Some(op) = op {
        attrs.push(Attr::new(OP_KEY, op));
    }
    if let Some(ctx) = ctx {
        attrs.push(Attr::new(REQUEST_ID_KEY, ctx.request_id()));
        attrs.push(Attr::new(USERNAME_KEY, ctx.username()));
    }
    for attr in explicit {
        upsert(&mut attrs, attr);
    }

    log.with(attrs)
}

fn upsert(attrs: &mut Vec<Attr>, attr: Attr) {
    match attrs.iter_mut().find(|existing| existing.key == attr.key) {
        Some(existing) => existing.value = attr.value,
        None => attrs.push(attr),
    }
}
