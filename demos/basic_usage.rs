use occ_store::retry::update;
use occ_store::Store;
use occ_store::StoreError;
use occ_store::Storer;
use occ_store::NO_VERSION;

fn main() -> Result<(), StoreError> {
    let dir = std::env::temp_dir().join("occ-store-basic-usage");
    let store = Store::open(dir.join("store.redb"), "brokers")?;

    // Create a key; a create on an existing key is a conflict.
    match store.put("instance-1", b"created", NO_VERSION) {
        Ok(seq) => println!("created instance-1 at seq {}", seq),
        Err(e) if e.is_conflict() => println!("instance-1 already exists: {}", e),
        Err(e) => return Err(e),
    }

    // Compare-and-swap with the version read last.
    let got = store.get("instance-1")?;
    let seq = store.put("instance-1", b"updated", got.seq)?;
    println!("updated instance-1 to seq {}", seq);

    // Read-modify-write that retries when another writer gets in between.
    let mut backoff = store_retry().backoff();
    let seq = update(&store, "counter_job", &mut backoff, |cur| {
        let n: u64 = cur
            .and_then(|c| std::str::from_utf8(c).ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Ok((n + 1).to_string().into_bytes())
    })?;
    println!("counter_job is at seq {}", seq);

    // Scan keys by suffix.
    for key in store.keys("_job")? {
        let sv = store.get(&key)?;
        println!("Key: {}, Value: {}", key, String::from_utf8_lossy(&sv.data));
    }

    store.del("instance-1")?;
    store.close()
}

fn store_retry() -> occ_store::RetryConfig {
    occ_store::RetryConfig::default().with_max_retries(5)
}
