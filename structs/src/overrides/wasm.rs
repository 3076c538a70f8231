use super::{FieldContext, FieldHook};
use crate::{Error, Value};
use bytes::Bytes;
use tracing::{error, info};

/// Compiles WebAssembly text into a binary module.
pub trait Assembler: Send + Sync {
    fn assemble(&self, source: &str) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Returns the text if `value` looks like a WebAssembly text module.
fn wasm_text(value: &Value) -> Option<&str> {
    let text = match value {
        Value::String(text) => text.as_str(),
        Value::Bytes(bytes) => std::str::from_utf8(bytes).ok()?,
        _ => return None,
    };
    text.trim_start().starts_with("(module").then_some(text)
}

/// Assembles `setcode.code` when it is supplied as WebAssembly text.
#[derive(Debug)]
pub struct WasmCode;

impl FieldHook for WasmCode {
    fn from_shorthand(&self, cx: &FieldContext<'_>, value: &Value) -> Result<Option<Value>, Error> {
        let Some(source) = wasm_text(value) else {
            return Ok(None);
        };
        let assembler = cx
            .registry
            .config()
            .assembler
            .as_ref()
            .ok_or(Error::MissingAssembler)?;

        info!(len = source.len(), "assembling wasm");
        match assembler.assemble(source) {
            Ok(code) => Ok(Some(Value::Bytes(Bytes::from(code)))),
            Err(err) => {
                error!(?err, source, "failed to assemble wasm");
                Err(Error::Assembly {
                    reason: err.to_string(),
                    source_text: source.to_string(),
                })
            }
        }
    }
}
