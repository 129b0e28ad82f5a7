//! scripted-host - Example host for the pickbridge facade
//!
//! Simulates the platform side of the bridge: a "picker" that resolves every
//! request from a script on its own thread (the way a real host delivers
//! activity results), and a resolver whose content handles are plain
//! filesystem paths. The main thread plays the engine, issuing the three
//! blocking-looking calls and printing what it gets back.

use pickbridge::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Picker that forwards requests to the scripted platform thread.
struct ScriptedPicker {
    tx: std::sync::Mutex<mpsc::Sender<(Ticket, PickerRequest)>>,
}

impl DocumentPicker for ScriptedPicker {
    fn request(&self, ticket: Ticket, request: PickerRequest) {
        self.tx.lock().unwrap().send((ticket, request)).unwrap();
    }
}

/// Resolver whose locators are filesystem paths.
struct PathResolver;

impl ContentResolver for PathResolver {
    fn open_read(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(fs::File::open(handle.locator())?))
    }

    fn open_write(&self, handle: &ContentHandle) -> std::io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(fs::File::create(handle.locator())?))
    }
}

/// Notices go straight to stdout, standing in for a toast/snackbar.
struct StdoutNotices;

impl NoticeSink for StdoutNotices {
    fn notice(&self, message: &str) {
        println!("[notice] {message}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let workspace = TempDir::new().unwrap();
    let plugins_dir = workspace.path().join("plugins");
    fs::create_dir_all(&plugins_dir).unwrap();

    // A plugin archive for the user to "pick".
    let archive_path = workspace.path().join("galactic-market.zip");
    write_demo_archive(&archive_path);

    let (tx, rx) = mpsc::channel();
    let picker = Arc::new(ScriptedPicker {
        tx: std::sync::Mutex::new(tx),
    });
    let bridge = Arc::new(FileBridge::new(
        picker,
        Arc::new(PathResolver),
        Arc::new(StdoutNotices),
    ));

    // The scripted platform: picks a destination for the save, the saved
    // file for the load, the archive for the install, and cancels anything
    // else.
    let save_dest = workspace.path().join("snapshot.dat");
    let platform = {
        let bridge = bridge.clone();
        let save_dest = save_dest.clone();
        let archive_path = archive_path.clone();
        thread::spawn(move || {
            for (ticket, _request) in rx.iter().take(3) {
                let picked = match ticket.kind() {
                    RequestKind::Save | RequestKind::Load => {
                        ContentHandle::new(save_dest.to_string_lossy())
                    }
                    RequestKind::Install => ContentHandle::new(archive_path.to_string_lossy()),
                };
                bridge.resolve(ticket, PickerReply::Picked(picked));
            }
        })
    };

    // The "engine" thread: three synchronous-looking calls.
    bridge.save("snapshot.dat", b"pilot: Calligrapher\nsystem: Rutilicus\n".to_vec());

    let loaded = bridge.load("Select saved game", "application/octet-stream");
    println!(
        "loaded {} bytes back",
        loaded.as_ref().map_or(0, Vec::len)
    );

    let installed = bridge.install_plugin("Select plugin archive", &plugins_dir);
    println!("plugin installed: {installed}");
    for entry in walk(&plugins_dir) {
        println!("  {}", entry.strip_prefix(workspace.path()).unwrap().display());
    }

    platform.join().unwrap();
}

fn write_demo_archive(path: &std::path::Path) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    writer.start_file("data/outfits.txt", options).unwrap();
    writer.write_all(b"outfit \"Demo Cannon\"\n").unwrap();
    writer.start_file("images/outfit/cannon.png", options).unwrap();
    writer.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
    writer.finish().unwrap();
}

fn walk(root: &std::path::Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(entries) = fs::read_dir(root) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                paths.extend(walk(&path));
            } else {
                paths.push(path);
            }
        }
    }
    paths
}
