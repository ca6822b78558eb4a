//! End-to-end checks of a bar session against a real worker and vault file.

use serde_json::json;
use vaultbar::app::menu::MenuKind;
use vaultbar::app::{KeyPress, OverflowItem};
use vaultbar::navigation::{Router, HOME, UNLOCK};
use vaultbar::storage::{EntryRecord, JsonStorage, Storage, IS_PASSWORD_SET};
use vaultbar::worker::{VaultWorker, WorkerMessage, WorkerResponse};
use vaultbar::{initialize, BarSession, Config, Event, SortOption};

const COLS: usize = 60;

fn strip_ansi(frame: &str) -> String {
    let mut out = String::new();
    let mut chars = frame.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn seeded_worker(dir: &tempfile::TempDir, password_set: bool) -> VaultWorker {
    let mut storage = JsonStorage::new(dir.path().join("vault.json")).unwrap();
    storage.write_preference(IS_PASSWORD_SET, json!(password_set)).unwrap();
    storage.upsert_entry(&EntryRecord::new("1", "GitHub", "octocat", 1)).unwrap();
    storage.upsert_entry(&EntryRecord::new("2", "AWS", "root", 0)).unwrap();
    VaultWorker::with_storage(Box::new(storage))
}

/// Posts every request through the worker's JSON surface, as the plugin does.
fn pump(session: &mut BarSession, worker: &mut VaultWorker, messages: Vec<WorkerMessage>) {
    for message in messages {
        let payload = serde_json::to_string(&message).unwrap();
        let reply = worker.respond(&payload).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        let update = session.dispatch(Event::WorkerResponse(response)).unwrap();
        pump(session, worker, update.worker_messages);
    }
}

fn started(worker: &mut VaultWorker) -> BarSession {
    let mut session = initialize(&Config::default());
    let update = session.start();
    pump(&mut session, worker, update.worker_messages);
    session
}

#[test]
fn home_lists_entries_and_filters_while_typing() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = seeded_worker(&dir, false);
    let mut session = started(&mut worker);

    let frame = strip_ansi(&session.render_frame(10, COLS));
    assert!(frame.contains("Tauthy"));
    let aws = frame.find("AWS").unwrap();
    let github = frame.find("GitHub").unwrap();
    assert!(aws < github, "custom order follows stored position");

    session.press_key(KeyPress::Printable('/')).unwrap();
    assert_eq!(session.context().search_term.get(), "");
    for c in "git".chars() {
        session.press_key(KeyPress::Printable(c)).unwrap();
    }
    let frame = strip_ansi(&session.render_frame(10, COLS));
    assert!(frame.contains("GitHub"));
    assert!(!frame.contains("AWS"));
}

#[test]
fn sort_menu_reorders_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = seeded_worker(&dir, false);
    let mut session = started(&mut worker);

    session.open_menu(MenuKind::Sort, COLS).unwrap();
    session.dispatch(Event::SelectSort(SortOption::AlphabeticalDescending)).unwrap();

    assert_eq!(session.context().sort_option.get(), SortOption::AlphabeticalDescending);
    let frame = strip_ansi(&session.render_frame(10, COLS));
    assert!(frame.find("GitHub").unwrap() < frame.find("AWS").unwrap());
}

#[test]
fn locking_persists_and_lands_on_unlock() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = seeded_worker(&dir, true);
    let mut session = started(&mut worker);

    session.open_menu(MenuKind::Overflow, COLS).unwrap();
    let update = session.dispatch(Event::SelectOverflow(OverflowItem::Lock)).unwrap();
    pump(&mut session, &mut worker, update.worker_messages);

    assert_eq!(session.router().current_path(), UNLOCK);
    assert!(session.bar().back_available());
    drop(worker);

    let contents = std::fs::read_to_string(dir.path().join("vault.json")).unwrap();
    let data: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(data["vault"]["locked"], json!(true));
}

#[test]
fn lock_is_absent_without_a_password() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = seeded_worker(&dir, false);
    let mut session = started(&mut worker);

    session.open_menu(MenuKind::Overflow, COLS).unwrap();
    let vm = session.viewmodel(COLS);
    let labels: Vec<_> = vm.overflow_menu.unwrap().items.into_iter().map(|i| i.label).collect();
    assert_eq!(labels, ["Settings", "About"]);

    let update = session.dispatch(Event::SelectOverflow(OverflowItem::Lock)).unwrap();
    assert!(update.worker_messages.is_empty());
    assert_eq!(session.router().current_path(), HOME);
}

#[test]
fn storage_failure_surfaces_as_lock_diagnostic() {
    let mut session = initialize(&Config::default());
    session.start();
    session
        .dispatch(Event::WorkerResponse(WorkerResponse::PreferencesLoaded { password_set: true }))
        .unwrap();

    session.open_menu(MenuKind::Sort, COLS).unwrap();
    session.dispatch(Event::SelectSort(SortOption::AlphabeticalDescending)).unwrap();
    session.open_menu(MenuKind::Overflow, COLS).unwrap();
    let update = session.dispatch(Event::SelectOverflow(OverflowItem::Lock)).unwrap();
    assert!(!session.bar().menus().is_open(MenuKind::Overflow));
    let WorkerMessage::LockVault { ticket, .. } = update.worker_messages[0].clone() else {
        panic!("expected lock request");
    };
    session
        .dispatch(Event::WorkerResponse(WorkerResponse::LockFailed {
            ticket,
            message: "storage unavailable".to_string(),
        }))
        .unwrap();

    assert_eq!(session.router().current_path(), HOME);
    assert!(session.bar().menus().focused().is_none());
    assert_eq!(session.context().sort_option.get(), SortOption::AlphabeticalDescending);
    assert_eq!(session.context().search_term.get(), "");
    assert_eq!(session.context().title.get(), "");
    let frame = strip_ansi(&session.render_frame(10, COLS));
    assert!(frame.contains("Failed to lock vault: storage unavailable"));
}

#[test]
fn sessions_are_independent() {
    let mut first = initialize(&Config::default());
    let mut second = initialize(&Config::default());
    first.start();
    second.start();

    first.press_key(KeyPress::Printable('a')).unwrap();
    assert!(first.bar().search_active());
    assert!(!second.bar().search_active());
    assert_eq!(second.context().search_term.get(), "");
}
