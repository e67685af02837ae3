//! Completion entry points handed to libindy.
//!
//! libindy completes every command by calling one of the functions below on
//! one of its own threads. Each entry point takes the continuation for the
//! command out of the [`command_registry`], decodes its payload into owned
//! memory and hands the outcome over. The only work done on the native thread
//! is the registry removal and a non-blocking channel send.

use crate::error::IndyError;
use crate::memory::{c_bytes_to_vec, c_str_to_string};
use crate::registry::{command_registry, CallbackRegistry};
use crate::types::CommandHandle;
use indy_common::logging::{Component, Logger};
use std::fmt;
use std::os::raw::c_char;
use std::sync::{Arc, RwLock};

pub type EmptyCallback = unsafe extern "C" fn(CommandHandle, i32);
pub type HandleCallback = unsafe extern "C" fn(CommandHandle, i32, i32);
pub type StringCallback = unsafe extern "C" fn(CommandHandle, i32, *const c_char);
pub type String2Callback = unsafe extern "C" fn(CommandHandle, i32, *const c_char, *const c_char);
pub type String3Callback =
    unsafe extern "C" fn(CommandHandle, i32, *const c_char, *const c_char, *const c_char);
pub type BytesCallback = unsafe extern "C" fn(CommandHandle, i32, *const u8, u32);
pub type StringBytesCallback = unsafe extern "C" fn(CommandHandle, i32, *const c_char, *const u8, u32);
pub type BoolCallback = unsafe extern "C" fn(CommandHandle, i32, u32);

/// Result signature of a native command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Empty,
    Handle,
    String,
    String2,
    String3,
    Bytes,
    StringBytes,
    Bool,
}

/// A completion entry point passed across the native boundary
#[derive(Debug, Clone, Copy)]
pub enum Callback {
    Empty(EmptyCallback),
    Handle(HandleCallback),
    String(StringCallback),
    String2(String2Callback),
    String3(String3Callback),
    Bytes(BytesCallback),
    StringBytes(StringBytesCallback),
    Bool(BoolCallback),
}

impl Callback {
    /// The entry point of this module that completes commands of `shape`
    pub fn for_shape(shape: Shape) -> Callback {
        match shape {
            Shape::Empty => Callback::Empty(empty_callback),
            Shape::Handle => Callback::Handle(handle_callback),
            Shape::String => Callback::String(string_callback),
            Shape::String2 => Callback::String2(string2_callback),
            Shape::String3 => Callback::String3(string3_callback),
            Shape::Bytes => Callback::Bytes(bytes_callback),
            Shape::StringBytes => Callback::StringBytes(string_bytes_callback),
            Shape::Bool => Callback::Bool(bool_callback),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Callback::Empty(_) => Shape::Empty,
            Callback::Handle(_) => Shape::Handle,
            Callback::String(_) => Shape::String,
            Callback::String2(_) => Shape::String2,
            Callback::String3(_) => Shape::String3,
            Callback::Bytes(_) => Shape::Bytes,
            Callback::StringBytes(_) => Shape::StringBytes,
            Callback::Bool(_) => Shape::Bool,
        }
    }
}

/// Decoded completion payload, owned by Rust
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Empty,
    Handle(i32),
    String(String),
    String2(String, String),
    String3(String, String, String),
    Bytes(Vec<u8>),
    StringBytes(String, Vec<u8>),
    Bool(bool),
}

/// A completion arrived for a handle that is not pending.
///
/// Either libindy delivered twice or a handle was never issued by this
/// process. There is no continuation to report it through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolFault {
    pub handle: CommandHandle,
    pub entry_point: &'static str,
    pub status: i32,
}

impl fmt::Display for ProtocolFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invoked for command {} (status {}) which is not pending",
            self.entry_point, self.handle, self.status
        )
    }
}

type FaultHandler = Arc<dyn Fn(&ProtocolFault) + Send + Sync + 'static>;

lazy_static::lazy_static! {
    static ref FAULT_HANDLER: RwLock<Option<FaultHandler>> = RwLock::new(None);
    static ref CALLBACK_LOGGER: Logger = Logger::new_root(Component::Callback);
}

/// Replace the process-wide protocol fault handler.
///
/// Without a handler a fault is logged and the process aborts.
pub fn set_protocol_fault_handler<F>(handler: F)
where
    F: Fn(&ProtocolFault) + Send + Sync + 'static,
{
    let mut slot = FAULT_HANDLER.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(Arc::new(handler));
}

/// Restore the default abort-on-fault behaviour
pub fn clear_protocol_fault_handler() {
    let mut slot = FAULT_HANDLER.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

pub(crate) fn report_fault(fault: ProtocolFault) {
    CALLBACK_LOGGER
        .with_command(fault.handle.0)
        .error_args(format_args!("protocol fault: {fault}"));
    let handler = FAULT_HANDLER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone();
    match handler {
        Some(handler) => handler(&fault),
        None => std::process::abort(),
    }
}

/// Resolve `handle` in `registry` and deliver either the status error or the
/// decoded payload. `decode` only runs for a zero status.
pub(crate) fn deliver_with<F>(
    registry: &CallbackRegistry,
    handle: CommandHandle,
    entry_point: &'static str,
    status: i32,
    decode: F,
) where
    F: FnOnce() -> Result<Payload, IndyError>,
{
    let Some(continuation) = registry.remove(handle) else {
        report_fault(ProtocolFault {
            handle,
            entry_point,
            status,
        });
        return;
    };

    let outcome = if status != 0 {
        Err(IndyError::failed(status))
    } else {
        decode()
    };
    CALLBACK_LOGGER.with_command(handle.0).debug_args(format_args!(
        "{entry_point} completed with status {status}"
    ));
    continuation(outcome);
}

fn deliver<F>(handle: CommandHandle, entry_point: &'static str, status: i32, decode: F)
where
    F: FnOnce() -> Result<Payload, IndyError>,
{
    deliver_with(command_registry(), handle, entry_point, status, decode)
}

/// Completion for commands without a result value.
///
/// # Safety
///
/// Called by libindy; no pointer arguments.
pub unsafe extern "C" fn empty_callback(command_handle: CommandHandle, err: i32) {
    deliver(command_handle, "empty_callback", err, || Ok(Payload::Empty));
}

/// Completion carrying a resource handle.
///
/// # Safety
///
/// Called by libindy; no pointer arguments.
pub unsafe extern "C" fn handle_callback(command_handle: CommandHandle, err: i32, handle: i32) {
    deliver(command_handle, "handle_callback", err, || Ok(Payload::Handle(handle)));
}

/// Completion carrying one string.
///
/// # Safety
///
/// On a zero status `value` must be null or a valid nul-terminated string.
pub unsafe extern "C" fn string_callback(command_handle: CommandHandle, err: i32, value: *const c_char) {
    deliver(command_handle, "string_callback", err, || {
        Ok(Payload::String(c_str_to_string(value)?))
    });
}

/// Completion carrying an ordered pair of strings.
///
/// # Safety
///
/// On a zero status both pointers must be null or valid nul-terminated strings.
pub unsafe extern "C" fn string2_callback(
    command_handle: CommandHandle,
    err: i32,
    first: *const c_char,
    second: *const c_char,
) {
    deliver(command_handle, "string2_callback", err, || {
        Ok(Payload::String2(c_str_to_string(first)?, c_str_to_string(second)?))
    });
}

/// Completion carrying an ordered triple of strings.
///
/// # Safety
///
/// On a zero status all pointers must be null or valid nul-terminated strings.
pub unsafe extern "C" fn string3_callback(
    command_handle: CommandHandle,
    err: i32,
    first: *const c_char,
    second: *const c_char,
    third: *const c_char,
) {
    deliver(command_handle, "string3_callback", err, || {
        Ok(Payload::String3(
            c_str_to_string(first)?,
            c_str_to_string(second)?,
            c_str_to_string(third)?,
        ))
    });
}

/// Completion carrying a byte buffer.
///
/// # Safety
///
/// On a zero status `data` must be null or point to `len` readable bytes.
pub unsafe extern "C" fn bytes_callback(command_handle: CommandHandle, err: i32, data: *const u8, len: u32) {
    deliver(command_handle, "bytes_callback", err, || {
        Ok(Payload::Bytes(c_bytes_to_vec(data, len)))
    });
}

/// Completion carrying a string and a byte buffer.
///
/// # Safety
///
/// On a zero status `value` must be null or a valid nul-terminated string and
/// `data` must be null or point to `len` readable bytes.
pub unsafe extern "C" fn string_bytes_callback(
    command_handle: CommandHandle,
    err: i32,
    value: *const c_char,
    data: *const u8,
    len: u32,
) {
    deliver(command_handle, "string_bytes_callback", err, || {
        Ok(Payload::StringBytes(c_str_to_string(value)?, c_bytes_to_vec(data, len)))
    });
}

/// Completion carrying a boolean (`indy_bool_t`, non-zero is true).
///
/// # Safety
///
/// Called by libindy; no pointer arguments.
pub unsafe extern "C" fn bool_callback(command_handle: CommandHandle, err: i32, value: u32) {
    deliver(command_handle, "bool_callback", err, || Ok(Payload::Bool(value != 0)));
}
