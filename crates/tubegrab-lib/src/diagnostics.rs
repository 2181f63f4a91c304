/// A live thread other than the main one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadInfo {
    pub id: u64,
    pub name: String,
}

#[cfg(target_os = "linux")]
pub fn non_main_threads() -> Vec<ThreadInfo> {
    let main_id = u64::from(std::process::id());
    let Ok(entries) = std::fs::read_dir("/proc/self/task") else {
        return Vec::new();
    };

    let mut threads: Vec<ThreadInfo> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let id: u64 = entry.file_name().to_str()?.parse().ok()?;
            if id == main_id {
                return None;
            }
            let name = std::fs::read_to_string(entry.path().join("comm"))
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            Some(ThreadInfo { id, name })
        })
        .collect();
    threads.sort_by_key(|t| t.id);
    threads
}

#[cfg(not(target_os = "linux"))]
pub fn non_main_threads() -> Vec<ThreadInfo> {
    Vec::new()
}

pub fn print_non_main_threads() {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        let metrics = handle.metrics();
        println!(
            "[debug] Runtime: {} workers, {} alive tasks",
            metrics.num_workers(),
            metrics.num_alive_tasks()
        );
    }

    let threads = non_main_threads();
    if threads.is_empty() {
        println!("[debug] No extra threads active.");
        return;
    }
    println!("[debug] Active threads after completion:");
    for thread in threads {
        println!("  - id={} name={:?}", thread.id, thread.name);
    }
}
