use monthplan_core::{ItemStatus, ManualClock, SeedConfig, SharedStore, StoreChange};
use std::sync::Arc;
use std::thread;

fn setup() -> SharedStore {
    SharedStore::with_config(Arc::new(ManualClock::new(1_000)), SeedConfig::default())
}

#[test]
fn subscribers_receive_one_event_per_applied_mutation() {
    let store = setup();
    let events = store.subscribe();

    let item_id = store
        .write(|store| store.add_inbox_item("watch me", None))
        .unwrap();
    let release_id = store.read(|store| store.selected_release_id());
    store.write(|store| store.move_item(item_id, ItemStatus::Done, Some(release_id)));
    store.write(|store| store.add_inbox_item("  ", None));

    let received = events.try_iter().collect::<Vec<_>>();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].version, 1);
    assert_eq!(received[0].change, StoreChange::ItemAdded(item_id));
    assert_eq!(
        received[1].change,
        StoreChange::ItemMoved {
            id: item_id,
            status: ItemStatus::Done,
            release_id: Some(release_id),
        }
    );
    assert_eq!(store.version(), 2);
}

#[test]
fn clones_share_state() {
    let store = setup();
    let other = store.clone();
    other.write(|store| store.add_tag("Shared"));
    assert_eq!(store.read(|store| store.tags().len()), 7);
}

#[test]
fn concurrent_writers_are_serialized() {
    let store = setup();
    let handles = (0..8)
        .map(|worker| {
            let store = store.clone();
            thread::spawn(move || {
                for index in 0..25 {
                    store.write(|store| store.add_inbox_item(&format!("w{worker}-{index}"), None));
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    assert_eq!(store.read(|store| store.items().len()), 200);
    assert_eq!(store.version(), 200);
}
