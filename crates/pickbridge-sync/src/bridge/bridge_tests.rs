#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;
use pickbridge_core::CollisionPolicy;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Picker that records requests instead of showing UI.
#[derive(Default)]
struct RecordingPicker {
    requests: Mutex<Vec<(Ticket, PickerRequest)>>,
}

impl DocumentPicker for RecordingPicker {
    fn request(&self, ticket: Ticket, request: PickerRequest) {
        self.requests.lock().push((ticket, request));
    }
}

impl RecordingPicker {
    fn last(&self) -> (Ticket, PickerRequest) {
        self.requests.lock().last().cloned().unwrap()
    }
}

/// In-memory resolver: locators are plain keys into a shared map.
#[derive(Default)]
struct MemoryResolver {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    names: Mutex<HashMap<String, String>>,
}

struct MemoryWriter {
    locator: String,
    buf: Vec<u8>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.files.lock().insert(self.locator.clone(), self.buf.clone());
        Ok(())
    }
}

impl ContentResolver for MemoryResolver {
    fn open_read(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read + Send>> {
        match self.files.lock().get(handle.locator()) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such document",
            )),
        }
    }

    fn open_write(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(MemoryWriter {
            locator: handle.locator().to_string(),
            buf: Vec::new(),
            files: self.files.clone(),
        }))
    }

    fn display_name(&self, handle: &ContentHandle) -> Option<String> {
        self.names.lock().get(handle.locator()).cloned()
    }
}

#[derive(Default)]
struct CollectedNotices {
    messages: Mutex<Vec<String>>,
}

impl NoticeSink for CollectedNotices {
    fn notice(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

struct Harness {
    bridge: Arc<FileBridge>,
    picker: Arc<RecordingPicker>,
    resolver: Arc<MemoryResolver>,
    notices: Arc<CollectedNotices>,
}

fn harness() -> Harness {
    let picker = Arc::new(RecordingPicker::default());
    let resolver = Arc::new(MemoryResolver::default());
    let notices = Arc::new(CollectedNotices::default());
    let bridge = Arc::new(FileBridge::new(
        picker.clone(),
        resolver.clone(),
        notices.clone(),
    ));
    Harness {
        bridge,
        picker,
        resolver,
        notices,
    }
}

#[test]
fn FileBridge___save___issues_create_request_and_returns_immediately() {
    let h = harness();

    h.bridge.save("pilot.txt", b"saved game".to_vec());

    let (ticket, request) = h.picker.last();
    assert_eq!(ticket.kind(), RequestKind::Save);
    match request {
        PickerRequest::Create {
            suggested_name,
            content_type,
        } => {
            assert_eq!(suggested_name, "pilot.txt");
            assert_eq!(content_type, "application/octet-stream");
        }
        PickerRequest::Open { .. } => panic!("save must issue a create request"),
    }
    assert_eq!(h.bridge.pending_requests(), 1);
}

#[test]
fn FileBridge___save___resolved_picked___writes_exact_bytes() {
    let h = harness();
    let payload = (0..200u8).collect::<Vec<u8>>();

    h.bridge.save("pilot.txt", payload.clone());
    let (ticket, _) = h.picker.last();
    h.bridge
        .resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/1")));

    assert_eq!(h.resolver.files.lock().get("doc/1"), Some(&payload));
    assert_eq!(h.bridge.pending_requests(), 0);
    assert!(h.notices.messages.lock().is_empty());
}

#[test]
fn FileBridge___save___resolved_cancelled___notices_and_clears_scratch() {
    let h = harness();

    h.bridge.save("pilot.txt", b"bytes".to_vec());
    let (ticket, _) = h.picker.last();
    h.bridge.resolve(ticket, PickerReply::Cancelled);

    assert!(h.resolver.files.lock().is_empty());
    assert_eq!(h.bridge.pending_requests(), 0);
    let messages = h.notices.messages.lock();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("pilot.txt"));
}

#[test]
fn FileBridge___save___write_failure___notices() {
    struct RefusingResolver;

    impl ContentResolver for RefusingResolver {
        fn open_read(&self, _: &ContentHandle) -> std::io::Result<Box<dyn Read + Send>> {
            Err(std::io::Error::other("nope"))
        }

        fn open_write(&self, _: &ContentHandle) -> std::io::Result<Box<dyn Write + Send>> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
        }
    }

    let picker = Arc::new(RecordingPicker::default());
    let notices = Arc::new(CollectedNotices::default());
    let bridge = FileBridge::new(picker.clone(), Arc::new(RefusingResolver), notices.clone());

    bridge.save("pilot.txt", b"bytes".to_vec());
    let (ticket, _) = picker.last();
    bridge.resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/1")));

    assert_eq!(notices.messages.lock().len(), 1);
}

#[test]
fn FileBridge___resolve___unknown_ticket___discarded_without_effect() {
    let h = harness();

    let stray = Ticket::new(RequestKind::Load, 999);
    h.bridge
        .resolve(stray, PickerReply::Picked(ContentHandle::new("doc/1")));

    assert_eq!(h.bridge.pending_requests(), 0);
    assert!(h.notices.messages.lock().is_empty());
}

#[test]
fn FileBridge___resolve___duplicate_reply___second_discarded() {
    let h = harness();

    h.bridge.save("pilot.txt", b"bytes".to_vec());
    let (ticket, _) = h.picker.last();
    h.bridge
        .resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/1")));
    // Late duplicate: the ticket was already claimed.
    h.bridge.resolve(ticket, PickerReply::Cancelled);

    assert!(h.notices.messages.lock().is_empty());
    assert_eq!(h.resolver.files.lock().get("doc/1"), Some(&b"bytes".to_vec()));
}

#[test]
fn FileBridge___load___blocks_until_platform_resolves() {
    let h = harness();
    h.resolver
        .files
        .lock()
        .insert("doc/save".to_string(), b"pilot data".to_vec());

    let caller = {
        let bridge = h.bridge.clone();
        thread::spawn(move || bridge.load("Select saved game", "application/octet-stream"))
    };

    // Wait for the request to show up, then resolve it from this thread.
    while h.bridge.pending_requests() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    let (ticket, _) = h.picker.last();
    thread::sleep(Duration::from_millis(20));
    h.bridge
        .resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/save")));

    assert_eq!(caller.join().unwrap(), Some(b"pilot data".to_vec()));
}

#[test]
fn FileBridge___load___cancelled___returns_none_without_notice() {
    let h = harness();

    let caller = {
        let bridge = h.bridge.clone();
        thread::spawn(move || bridge.load("Select saved game", "application/octet-stream"))
    };

    while h.bridge.pending_requests() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    let (ticket, _) = h.picker.last();
    h.bridge.resolve(ticket, PickerReply::Cancelled);

    assert_eq!(caller.join().unwrap(), None);
    assert!(h.notices.messages.lock().is_empty());
}

#[test]
fn FileBridge___load___read_failure___returns_none_with_notice() {
    let h = harness();

    let caller = {
        let bridge = h.bridge.clone();
        thread::spawn(move || bridge.load("Select saved game", "application/octet-stream"))
    };

    while h.bridge.pending_requests() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    let (ticket, _) = h.picker.last();
    h.bridge
        .resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/missing")));

    assert_eq!(caller.join().unwrap(), None);
    assert_eq!(h.notices.messages.lock().len(), 1);
}

#[test]
fn FileBridge___abort_all___unblocks_waiter_and_fences_late_reply() {
    let h = harness();
    h.resolver
        .files
        .lock()
        .insert("doc/save".to_string(), b"pilot data".to_vec());

    let caller = {
        let bridge = h.bridge.clone();
        thread::spawn(move || bridge.load("Select saved game", "application/octet-stream"))
    };

    while h.bridge.pending_requests() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    let (ticket, _) = h.picker.last();

    h.bridge.abort_all();
    assert_eq!(caller.join().unwrap(), None);

    // The platform answers anyway; the reply must be discarded, not executed.
    h.bridge
        .resolve(ticket, PickerReply::Picked(ContentHandle::new("doc/save")));
    assert_eq!(h.bridge.pending_requests(), 0);
}

#[test]
fn FileBridge___with_config___applies_archive_filter_and_policy() {
    let picker = Arc::new(RecordingPicker::default());
    let resolver = Arc::new(MemoryResolver::default());
    let notices = Arc::new(CollectedNotices::default());
    let config = BridgeConfig::from_json(
        br#"{"archive_content_type": "application/x-zip", "collision_policy": "fail"}"#,
    )
    .unwrap();
    let bridge = Arc::new(
        FileBridge::new(picker.clone(), resolver, notices).with_config(config),
    );

    let temp = tempfile::TempDir::new().unwrap();
    let dest = temp.path().to_path_buf();
    let caller = {
        let bridge = bridge.clone();
        thread::spawn(move || bridge.install_plugin("Select plugin", &dest))
    };

    while bridge.pending_requests() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    let (ticket, request) = picker.last();
    assert_eq!(ticket.kind(), RequestKind::Install);
    match request {
        PickerRequest::Open { content_type, .. } => {
            assert_eq!(content_type, "application/x-zip");
        }
        PickerRequest::Create { .. } => panic!("install must issue an open request"),
    }
    assert_eq!(bridge.config().collision_policy, CollisionPolicy::Fail);

    bridge.resolve(ticket, PickerReply::Cancelled);
    assert!(!caller.join().unwrap());
}
