//! A completion for a command that is no longer pending must reach the
//! fault handler instead of a continuation

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use indy_sdk::{set_protocol_fault_handler, CommandHandle, Indy, NativeCall, Payload};
use indy_test_utils::{complete, MockLibrary, Reply};

#[test]
fn test_duplicate_and_stale_completions_are_reported() {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    set_protocol_fault_handler(move |fault| {
        let _ = tx.lock().unwrap().send(fault.clone());
    });

    let mock = Arc::new(MockLibrary::new());
    mock.on("indy_list_pools", Reply::Never);
    let indy = Indy::with_library(mock.clone());

    let pending = indy.submit::<String>(&NativeCall::ListPools);
    let (handle, callback) = mock.take_stranded()[0];

    complete(callback, handle, Payload::String("first".to_string())).unwrap();
    assert_eq!(pending.wait(), Ok("first".to_string()));

    // Second delivery for the same handle
    complete(callback, handle, Payload::String("second".to_string())).unwrap();
    let fault = rx.recv().expect("duplicate delivery should be reported");
    assert_eq!(fault.handle, handle);
    assert_eq!(fault.entry_point, "string_callback");
    assert_eq!(fault.status, 0);

    // A handle that was never issued
    complete(callback, CommandHandle(-3), Payload::String("stale".to_string())).unwrap();
    let fault = rx.recv().expect("stale handle should be reported");
    assert_eq!(fault.handle, CommandHandle(-3));
    assert!(fault.to_string().contains("not pending"));
}
