//! Generic adapter between the blocking facade and asynchronous libindy
//! commands.
//!
//! [`Indy::submit`] registers a continuation, issues the native call and
//! returns a [`Pending`] that resolves once the matching completion entry
//! point fires, or immediately when the call is rejected.

use crate::callbacks::{report_fault, Callback, Payload, ProtocolFault, Shape};
use crate::config::IndyConfig;
use crate::error::{IndyError, Result};
use crate::memory::{native_len, to_cstring, to_optional_cstring};
use crate::native::{Argument, NativeCall, NativeLibrary};
use crate::registry::command_registry;
use crate::types::ResourceHandle;
use indy_common::logging::{Component, Logger};
use std::ffi::CString;
use std::future::Future;
use std::pin::Pin;
use std::sync::{mpsc, Arc};
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// A Rust value a native command completes with
pub trait CallbackResult: Sized + Send + 'static {
    /// Completion entry point shape that produces this value
    const SHAPE: Shape;

    fn from_payload(payload: Payload) -> Result<Self>;
}

fn unexpected<T>(expected: Shape, payload: &Payload) -> Result<T> {
    Err(IndyError::InvalidResponse(format!(
        "expected a {expected:?} completion, got {payload:?}"
    )))
}

impl CallbackResult for () {
    const SHAPE: Shape = Shape::Empty;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::Empty => Ok(()),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for ResourceHandle {
    const SHAPE: Shape = Shape::Handle;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::Handle(handle) => Ok(ResourceHandle(handle)),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for String {
    const SHAPE: Shape = Shape::String;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::String(value) => Ok(value),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for (String, String) {
    const SHAPE: Shape = Shape::String2;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::String2(first, second) => Ok((first, second)),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for (String, String, String) {
    const SHAPE: Shape = Shape::String3;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::String3(first, second, third) => Ok((first, second, third)),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for Vec<u8> {
    const SHAPE: Shape = Shape::Bytes;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::Bytes(data) => Ok(data),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for (String, Vec<u8>) {
    const SHAPE: Shape = Shape::StringBytes;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::StringBytes(value, data) => Ok((value, data)),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

impl CallbackResult for bool {
    const SHAPE: Shape = Shape::Bool;

    fn from_payload(payload: Payload) -> Result<Self> {
        match payload {
            Payload::Bool(value) => Ok(value),
            other => unexpected(Self::SHAPE, &other),
        }
    }
}

/// The outcome of an issued command, delivered exactly once.
///
/// Block on it with [`Pending::wait`] or `.await` it from async code.
#[must_use = "a pending command does nothing unless waited on"]
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T> Pending<T> {
    fn ready(outcome: Result<T>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(outcome);
        Self { receiver }
    }

    /// Block the current thread until the command completes.
    ///
    /// Panics when called from within an async runtime; await the
    /// `Pending` there instead.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(IndyError::Disconnected))
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(IndyError::Disconnected)))
    }
}

/// Entry point to every wrapped libindy operation.
///
/// Cheap to clone; clones share the underlying native library.
#[derive(Clone)]
pub struct Indy {
    library: Arc<dyn NativeLibrary>,
    logger: Logger,
}

impl std::fmt::Debug for Indy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indy").finish_non_exhaustive()
    }
}

#[cfg(feature = "libindy")]
impl Default for Indy {
    fn default() -> Self {
        Self::new()
    }
}

impl Indy {
    /// Wrap a native library without touching process-wide logging
    pub fn with_library(library: Arc<dyn NativeLibrary>) -> Self {
        Self {
            library,
            logger: Logger::new_root(Component::Native),
        }
    }

    /// Wrap a native library and apply `config`
    pub fn with_config(library: Arc<dyn NativeLibrary>, config: IndyConfig) -> Self {
        if let Some(logging) = &config.logging_config {
            logging.apply();
        }
        Self::with_library(library)
    }

    /// Use the linked libindy shared library
    #[cfg(feature = "libindy")]
    pub fn new() -> Self {
        Self::with_library(Arc::new(crate::native::LibIndy::new()))
    }

    pub(crate) fn logger(&self, component: Component) -> Logger {
        self.logger.with_component(component)
    }

    /// Issue `call` and return its pending outcome.
    ///
    /// The result type selects the completion entry point; it has to match
    /// the result signature of `call`.
    pub fn submit<T: CallbackResult>(&self, call: &NativeCall<'_>) -> Pending<T> {
        let (sender, receiver) = oneshot::channel();
        let issued = self.issue(call, move |outcome: Result<T>| {
            // The receiver may be gone if the caller stopped waiting.
            let _ = sender.send(outcome);
        });
        match issued {
            Ok(()) => Pending { receiver },
            Err(e) => Pending::ready(Err(e)),
        }
    }

    /// Issue `call` and block until it completes.
    ///
    /// Waits on a std channel so the facades stay callable from threads
    /// that drive an async runtime.
    pub(crate) fn run<T: CallbackResult>(&self, call: &NativeCall<'_>) -> Result<T> {
        let (sender, receiver) = mpsc::sync_channel(1);
        self.issue(call, move |outcome: Result<T>| {
            let _ = sender.send(outcome);
        })?;
        receiver.recv().unwrap_or(Err(IndyError::Disconnected))
    }

    /// Register `deliver` as the continuation of `call` and issue it.
    ///
    /// `deliver` runs exactly once unless an `Err` is returned, in which case
    /// nothing was registered or issued.
    fn issue<T, F>(&self, call: &NativeCall<'_>, deliver: F) -> Result<()>
    where
        T: CallbackResult,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let operation = call.name();
        if call.shape() != T::SHAPE {
            return Err(IndyError::InvalidArgument(format!(
                "{operation} completes with {:?}, not {:?}",
                call.shape(),
                T::SHAPE
            )));
        }
        for argument in call.arguments() {
            if let Argument::Bytes(field, data) = argument {
                native_len(field, data.len())?;
            }
        }

        let registry = command_registry();
        let handle = registry.register(Box::new(move |outcome: Result<Payload>| {
            deliver(outcome.and_then(T::from_payload));
        }));

        let logger = self.logger.with_operation(operation).with_command(handle.0);
        logger.debug("issuing native call");

        let status = self
            .library
            .invoke(handle, call, Callback::for_shape(T::SHAPE));
        if status != 0 {
            logger.warn_args(format_args!("rejected with status {status}"));
            match registry.remove(handle) {
                Some(continuation) => continuation(Err(IndyError::rejected(status))),
                None => report_fault(ProtocolFault {
                    handle,
                    entry_point: operation,
                    status,
                }),
            }
        }
        Ok(())
    }
}

/// Fail with [`IndyError::MissingArgument`] when `value` is empty
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(IndyError::missing(field))
    } else {
        Ok(())
    }
}

/// Validate and marshal a required argument
pub(crate) fn required(field: &'static str, value: &str) -> Result<CString> {
    require(field, value)?;
    to_cstring(field, value)
}

/// Marshal an optional argument; empty values become null
pub(crate) fn optional(field: &'static str, value: Option<&str>) -> Result<Option<CString>> {
    to_optional_cstring(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommandHandle;
    use std::sync::Mutex;
    use std::thread;

    /// Completes every accepted call from a fresh thread, or rejects with a
    /// fixed status
    struct Scripted {
        reject_with: i32,
        issued: Mutex<Vec<&'static str>>,
    }

    impl Scripted {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                reject_with: 0,
                issued: Mutex::new(Vec::new()),
            })
        }

        fn rejecting(status: i32) -> Arc<Self> {
            Arc::new(Self {
                reject_with: status,
                issued: Mutex::new(Vec::new()),
            })
        }
    }

    impl NativeLibrary for Scripted {
        fn invoke(&self, handle: CommandHandle, call: &NativeCall<'_>, callback: Callback) -> i32 {
            self.issued.lock().unwrap().push(call.name());
            if self.reject_with != 0 {
                return self.reject_with;
            }
            match callback {
                Callback::Empty(cb) => {
                    thread::spawn(move || unsafe { cb(handle, 0) });
                }
                Callback::String2(cb) => {
                    thread::spawn(move || {
                        let id = CString::new("schema:1").unwrap();
                        let json = CString::new("{}").unwrap();
                        unsafe { cb(handle, 0, id.as_ptr(), json.as_ptr()) };
                    });
                }
                other => panic!("unexpected callback {other:?}"),
            }
            0
        }
    }

    #[test]
    fn test_result_types_decode_matching_payloads() {
        assert_eq!(bool::from_payload(Payload::Bool(true)), Ok(true));
        assert_eq!(
            ResourceHandle::from_payload(Payload::Handle(5)),
            Ok(ResourceHandle(5))
        );
        assert_eq!(
            <(String, Vec<u8>)>::from_payload(Payload::StringBytes("vk".into(), vec![1])),
            Ok(("vk".to_string(), vec![1]))
        );
        assert!(matches!(
            String::from_payload(Payload::Empty),
            Err(IndyError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_completion_is_delivered_to_waiter() {
        let library = Scripted::accepting();
        let indy = Indy::with_library(library.clone());
        let call = NativeCall::ParseGetSchemaResponse { response: c"{}" };

        let (id, json): (String, String) = indy.run(&call).expect("completion should deliver");
        assert_eq!(id, "schema:1");
        assert_eq!(json, "{}");
        assert_eq!(*library.issued.lock().unwrap(), vec!["indy_parse_get_schema_response"]);
    }

    #[test]
    fn test_immediate_rejection_never_blocks() {
        let indy = Indy::with_library(Scripted::rejecting(113));
        let call = NativeCall::CloseWallet {
            wallet: crate::types::WalletHandle(1),
        };

        let err = indy.run::<()>(&call).unwrap_err();
        assert_eq!(err, IndyError::rejected(113));
    }

    #[test]
    fn test_mismatched_result_type_is_not_issued() {
        let library = Scripted::accepting();
        let indy = Indy::with_library(library.clone());
        let call = NativeCall::ListPools;

        let err = indy.run::<bool>(&call).unwrap_err();
        assert!(matches!(err, IndyError::InvalidArgument(_)));
        assert!(library.issued.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dropped_continuation_is_disconnected() {
        let (sender, receiver) = oneshot::channel::<Result<()>>();
        drop(sender);
        let pending = Pending { receiver };
        assert_eq!(pending.wait(), Err(IndyError::Disconnected));
    }

    #[test]
    fn test_delivery_after_caller_gave_up_is_harmless() {
        let indy = Indy::with_library(Scripted::accepting());
        let call = NativeCall::ClosePoolLedger {
            pool: crate::types::PoolHandle(4),
        };
        drop(indy.submit::<()>(&call));
        // Completion still runs on the library thread without a receiver
        thread::sleep(std::time::Duration::from_millis(20));
    }

    #[test]
    fn test_require_rejects_empty() {
        assert_eq!(require("did", ""), Err(IndyError::missing("did")));
        assert_eq!(require("did", "VsKV7grR1BUE29mG2Fm2kZ"), Ok(()));
        assert_eq!(required("did", ""), Err(IndyError::missing("did")));
        assert!(optional("config", Some("")).unwrap().is_none());
    }
}
