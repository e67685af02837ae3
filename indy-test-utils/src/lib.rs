// Test utilities for the Indy SDK wrapper
//
// This crate provides test-specific functionality that should not be available
// in production builds. All functions in this crate are for testing only.

use anyhow::{anyhow, Context, Result};
use indy_common::logging::{Component, LogLevel, Logger, LoggingConfig};
use indy_sdk::{Argument, Callback, CommandHandle, NativeCall, NativeLibrary, Payload, Shape};
use std::collections::HashMap;
use std::ffi::CString;
use std::ptr;
use std::sync::{Mutex, MutexGuard};
use std::thread;

pub mod fixtures;

/// How the mock answers one native entry point
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Accept the call and complete it successfully with this payload
    Complete(Payload),
    /// Accept the call and complete it with a non-zero status
    Fail(i32),
    /// Refuse the call with a non-zero immediate status
    Reject(i32),
    /// Accept the call and never complete it
    Never,
}

/// Owned copy of a marshaled argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedArgument {
    Text(&'static str, Option<String>),
    Bytes(&'static str, Vec<u8>),
    Handle(&'static str, i32),
}

/// A native call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub name: &'static str,
    pub handle: CommandHandle,
    pub arguments: Vec<RecordedArgument>,
}

impl RecordedCall {
    /// Text argument by native parameter name; `None` when it was passed as null
    pub fn text(&self, name: &str) -> Option<&str> {
        self.arguments.iter().find_map(|arg| match arg {
            RecordedArgument::Text(n, value) if *n == name => value.as_deref(),
            _ => None,
        })
    }

    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.arguments.iter().find_map(|arg| match arg {
            RecordedArgument::Bytes(n, value) if *n == name => Some(value.as_slice()),
            _ => None,
        })
    }

    pub fn handle_arg(&self, name: &str) -> Option<i32> {
        self.arguments.iter().find_map(|arg| match arg {
            RecordedArgument::Handle(n, value) if *n == name => Some(*value),
            _ => None,
        })
    }
}

/// In-process stand-in for libindy.
///
/// Records every call and answers it according to the configured [`Reply`].
/// Accepted calls are completed from a freshly spawned thread through the
/// real completion entry points, the way libindy completes them from its
/// own worker threads.
pub struct MockLibrary {
    replies: Mutex<HashMap<&'static str, Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    stranded: Mutex<Vec<(CommandHandle, Callback)>>,
    logger: Logger,
}

impl Default for MockLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockLibrary {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            stranded: Mutex::new(Vec::new()),
            logger: Logger::new_root(Component::Custom("MockLibrary")),
        }
    }

    /// Answer calls to the native entry point `name` with `reply`
    pub fn on(&self, name: &'static str, reply: Reply) -> &Self {
        lock(&self.replies).insert(name, reply);
        self
    }

    /// Every call issued so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// The most recent call to `name`
    pub fn last_call(&self, name: &str) -> Option<RecordedCall> {
        lock(&self.calls).iter().rev().find(|c| c.name == name).cloned()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Take the commands answered with [`Reply::Never`] so far
    pub fn take_stranded(&self) -> Vec<(CommandHandle, Callback)> {
        std::mem::take(&mut *lock(&self.stranded))
    }

    fn default_reply(shape: Shape) -> Reply {
        Reply::Complete(match shape {
            Shape::Empty => Payload::Empty,
            Shape::Handle => Payload::Handle(1),
            Shape::String => Payload::String("{}".to_string()),
            Shape::String2 => Payload::String2(String::new(), "{}".to_string()),
            Shape::String3 => Payload::String3("{}".to_string(), String::new(), String::new()),
            Shape::Bytes => Payload::Bytes(Vec::new()),
            Shape::StringBytes => Payload::StringBytes(String::new(), Vec::new()),
            Shape::Bool => Payload::Bool(true),
        })
    }
}

fn record(handle: CommandHandle, call: &NativeCall<'_>) -> RecordedCall {
    let arguments = call
        .arguments()
        .into_iter()
        .map(|arg| match arg {
            Argument::Text(name, value) => {
                RecordedArgument::Text(name, value.map(|v| v.to_string_lossy().into_owned()))
            }
            Argument::Bytes(name, data) => RecordedArgument::Bytes(name, data.to_vec()),
            Argument::Handle(name, value) => RecordedArgument::Handle(name, value),
        })
        .collect();
    RecordedCall {
        name: call.name(),
        handle,
        arguments,
    }
}

impl NativeLibrary for MockLibrary {
    fn invoke(&self, handle: CommandHandle, call: &NativeCall<'_>, callback: Callback) -> i32 {
        lock(&self.calls).push(record(handle, call));
        let reply = lock(&self.replies)
            .get(call.name())
            .cloned()
            .unwrap_or_else(|| Self::default_reply(call.shape()));

        self.logger
            .debug_args(format_args!("{} -> {reply:?}", call.name()));
        match reply {
            Reply::Reject(status) => status,
            Reply::Never => {
                lock(&self.stranded).push((handle, callback));
                0
            }
            Reply::Fail(status) => {
                thread::spawn(move || fail(callback, handle, status));
                0
            }
            Reply::Complete(payload) => {
                thread::spawn(move || {
                    if let Err(e) = complete(callback, handle, payload) {
                        panic!("mock completion failed: {e:#}");
                    }
                });
                0
            }
        }
    }
}

/// Invoke `callback` with a non-zero `status` and invalid payload pointers
pub fn fail(callback: Callback, handle: CommandHandle, status: i32) {
    let bogus = ptr::NonNull::<u8>::dangling().as_ptr() as *const u8;
    let bogus_text = bogus as *const std::os::raw::c_char;
    // SAFETY: a non-zero status means the payload is never read.
    unsafe {
        match callback {
            Callback::Empty(cb) => cb(handle, status),
            Callback::Handle(cb) => cb(handle, status, -1),
            Callback::String(cb) => cb(handle, status, bogus_text),
            Callback::String2(cb) => cb(handle, status, bogus_text, bogus_text),
            Callback::String3(cb) => cb(handle, status, bogus_text, bogus_text, bogus_text),
            Callback::Bytes(cb) => cb(handle, status, bogus, u32::MAX),
            Callback::StringBytes(cb) => cb(handle, status, bogus_text, bogus, u32::MAX),
            Callback::Bool(cb) => cb(handle, status, 7),
        }
    }
}

/// Invoke `callback` successfully with `payload`, which must match its shape
pub fn complete(callback: Callback, handle: CommandHandle, payload: Payload) -> Result<()> {
    fn c(value: &str) -> Result<CString> {
        CString::new(value).context("mock payload text contains NUL")
    }

    // SAFETY: every pointer refers to a local buffer alive for the whole call.
    unsafe {
        match (callback, payload) {
            (Callback::Empty(cb), Payload::Empty) => cb(handle, 0),
            (Callback::Handle(cb), Payload::Handle(value)) => cb(handle, 0, value),
            (Callback::String(cb), Payload::String(value)) => {
                let value = c(&value)?;
                cb(handle, 0, value.as_ptr())
            }
            (Callback::String2(cb), Payload::String2(first, second)) => {
                let (first, second) = (c(&first)?, c(&second)?);
                cb(handle, 0, first.as_ptr(), second.as_ptr())
            }
            (Callback::String3(cb), Payload::String3(first, second, third)) => {
                let (first, second, third) = (c(&first)?, c(&second)?, c(&third)?);
                cb(handle, 0, first.as_ptr(), second.as_ptr(), third.as_ptr())
            }
            (Callback::Bytes(cb), Payload::Bytes(data)) => cb(handle, 0, data.as_ptr(), data.len() as u32),
            (Callback::StringBytes(cb), Payload::StringBytes(value, data)) => {
                let value = c(&value)?;
                cb(handle, 0, value.as_ptr(), data.as_ptr(), data.len() as u32)
            }
            (Callback::Bool(cb), Payload::Bool(value)) => cb(handle, 0, u32::from(value)),
            (callback, payload) => {
                return Err(anyhow!(
                    "payload {payload:?} does not fit a {:?} callback",
                    callback.shape()
                ))
            }
        }
    }
    Ok(())
}

/// Install a debug-level logger for test output
pub fn init_test_logging() {
    LoggingConfig::new()
        .with_default_level(LogLevel::Debug)
        .apply();
}
