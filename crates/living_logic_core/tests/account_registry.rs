use chrono::{TimeZone, Utc};
use living_logic_core::{
    AccountRepository, AccountService, FixedClock, MemorySlotStore, NewAccount, RegisterOutcome,
    RepoError, SlotAccountRepository, SlotStore, DEFAULT_STORAGE_SLOT,
};

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap())
}

fn repo(store: &MemorySlotStore) -> SlotAccountRepository<&MemorySlotStore, FixedClock> {
    SlotAccountRepository::new(store, clock(), DEFAULT_STORAGE_SLOT)
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);

    let first = repo
        .register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap();
    assert_eq!(first, RegisterOutcome::Registered);
    let before = store.raw(DEFAULT_STORAGE_SLOT);

    let second = repo
        .register(&NewAccount::new("A@B.com", "Different1", "Bob"))
        .unwrap();
    assert_eq!(second, RegisterOutcome::DuplicateEmail);
    assert_eq!(store.raw(DEFAULT_STORAGE_SLOT), before);

    let accounts = repo.list();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Alice");
    assert_eq!(accounts[0].email, "a@b.com");
}

#[test]
fn registration_stamps_clock_time_and_keeps_insertion_order() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);

    for (email, name) in [("c@x.com", "Carol"), ("a@x.com", "Ann"), ("b@x.com", "Ben")] {
        repo.register(&NewAccount::new(email, "Abcdef12", name))
            .unwrap();
    }

    let accounts = repo.list();
    let names = accounts
        .iter()
        .map(|account| account.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Carol", "Ann", "Ben"]);
    assert!(accounts
        .iter()
        .all(|account| account.registered_at == clock().0));
}

#[test]
fn credentials_round_trip() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    repo.register(&NewAccount::new("foo@bar.com", "Abcdef12", "Foo"))
        .unwrap();

    assert!(repo.validate_credentials("foo@bar.com", "Abcdef12"));
    assert!(repo.validate_credentials("FOO@BAR.COM", "Abcdef12"));
    assert!(!repo.validate_credentials("foo@bar.com", "Abcdef12x"));
    assert!(repo.is_email_registered("Foo@Bar.com"));
}

#[test]
fn unknown_email_is_neither_registered_nor_valid() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);

    assert!(!repo.validate_credentials("unknown@x.com", "anything"));
    assert!(!repo.is_email_registered("unknown@x.com"));
    assert!(repo.list().is_empty());
}

#[test]
fn stored_password_is_not_plaintext() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    repo.register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap();

    let raw = store.raw(DEFAULT_STORAGE_SLOT).expect("slot written");
    assert!(!raw.contains("Abcdef12"));
    assert!(repo.list()[0].password.starts_with("$argon2"));
}

#[test]
fn clear_all_forgets_every_account() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    repo.register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap();

    repo.clear_all().unwrap();

    assert!(repo.list().is_empty());
    assert!(!repo.is_email_registered("a@b.com"));
    assert_eq!(store.raw(DEFAULT_STORAGE_SLOT), None);
}

#[test]
fn corrupt_slot_reads_as_empty_and_is_replaced_on_register() {
    let store = MemorySlotStore::new();
    store.set(DEFAULT_STORAGE_SLOT, "{not json").unwrap();
    let repo = repo(&store);

    assert!(repo.list().is_empty());
    assert_eq!(
        repo.register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
            .unwrap(),
        RegisterOutcome::Registered
    );
    assert_eq!(repo.list().len(), 1);
}

#[test]
fn unreadable_slot_reads_as_empty() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    repo.register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap();

    store.fail_reads(true);
    assert!(repo.list().is_empty());
    assert!(!repo.is_email_registered("a@b.com"));
}

#[test]
fn write_fault_is_reported_not_swallowed() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    store.fail_writes(true);

    let err = repo
        .register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Storage(_)));
    assert!(repo.clear_all().is_err());

    store.fail_writes(false);
    assert!(repo.list().is_empty());
}

#[test]
fn service_register_is_true_exactly_once() {
    let store = MemorySlotStore::new();
    let service = AccountService::new(repo(&store));

    assert!(service.register(&NewAccount::new("x@y.com", "Abcdef12", "X")));
    assert!(!service.register(&NewAccount::new("X@Y.COM", "Abcdef12", "X")));

    store.fail_writes(true);
    assert!(!service.register(&NewAccount::new("new@y.com", "Abcdef12", "N")));
    assert!(!service.clear_all());
}

#[test]
fn legacy_plaintext_slot_is_readable() {
    let store = MemorySlotStore::new();
    store
        .set(
            DEFAULT_STORAGE_SLOT,
            r#"[{"email":"Old@Site.com","password":"hunter22","registeredAt":"2024-05-01T10:00:00.000Z"}]"#,
        )
        .unwrap();
    let repo = repo(&store);

    let accounts = repo.list();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "");
    assert!(repo.validate_credentials("old@site.com", "hunter22"));
    assert!(!repo.validate_credentials("old@site.com", "Hunter22"));
}

#[test]
fn persisted_layout_uses_site_field_names() {
    let store = MemorySlotStore::new();
    let repo = repo(&store);
    repo.register(&NewAccount::new("a@b.com", "Abcdef12", "Alice"))
        .unwrap();

    let raw = store.raw(DEFAULT_STORAGE_SLOT).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["email"], "a@b.com");
    assert_eq!(record["name"], "Alice");
    assert!(record["password"].is_string());
    assert!(record["registeredAt"]
        .as_str()
        .unwrap()
        .starts_with("2026-01-15T08:00:00"));
}
