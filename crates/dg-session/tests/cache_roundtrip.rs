use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use dg_session::{CacheKey, ContentCache, SessionContext};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn store_lookup_invalidate_roundtrip() {
    let session = SessionContext::open("test", unique_temp_dir("dg_session_cache")).unwrap();
    let cache = ContentCache::for_workspace(session.workspace()).unwrap();

    let artifact = session.path("config.json");
    fs::write(&artifact, "{\"layers\": {}}").unwrap();

    let key = CacheKey::for_file(&artifact, &["transmittance=0.6"]).unwrap();
    assert!(!cache.contains(&key));
    assert!(cache.lookup(&key).unwrap().is_none());

    let stored = cache.store(&key, &[&artifact]).unwrap();
    assert_eq!(stored.len(), 1);
    assert!(cache.contains(&key));

    let found = cache.lookup(&key).unwrap().expect("entry should exist");
    assert_eq!(found, stored);
    assert_eq!(fs::read_to_string(&found[0]).unwrap(), "{\"layers\": {}}");

    cache.invalidate(&key).unwrap();
    assert!(!cache.contains(&key));

    session.cleanup().unwrap();
}

#[test]
fn different_parameters_do_not_share_entries() {
    let session = SessionContext::open("test", unique_temp_dir("dg_session_params")).unwrap();
    let cache = ContentCache::for_workspace(session.workspace()).unwrap();

    let artifact = session.path("daylight.mat");
    fs::write(&artifact, "void glass rad_glass_60\n").unwrap();

    let key_60 = CacheKey::for_file(&artifact, &["transmittance=0.6"]).unwrap();
    let key_70 = CacheKey::for_file(&artifact, &["transmittance=0.7"]).unwrap();
    assert_ne!(key_60, key_70);

    cache.store(&key_60, &[&artifact]).unwrap();
    assert!(cache.contains(&key_60));
    assert!(!cache.contains(&key_70));

    session.cleanup().unwrap();
}

#[test]
fn begin_commit_seals_in_place_entries() {
    let session = SessionContext::open("test", unique_temp_dir("dg_session_begin")).unwrap();
    let cache = ContentCache::for_workspace(session.workspace()).unwrap();

    let key = CacheKey::for_params(&["https://cloud.example.com/acme/projects/demo/studies/1", "results"]);
    let staging = cache.begin(&key).unwrap();
    fs::create_dir_all(staging.join("results")).unwrap();
    fs::write(staging.join("results").join("scene.hdr"), "#?RADIANCE\n").unwrap();

    // Not visible until committed.
    assert!(!cache.contains(&key));
    cache.commit(&key, &["results"]).unwrap();
    assert!(cache.contains(&key));

    let found = cache.lookup(&key).unwrap().expect("entry should exist");
    assert_eq!(found, vec![staging.join("results")]);

    session.cleanup().unwrap();
}

#[test]
fn commit_rejects_missing_artifacts() {
    let session = SessionContext::open("test", unique_temp_dir("dg_session_commit")).unwrap();
    let cache = ContentCache::for_workspace(session.workspace()).unwrap();

    let key = CacheKey::for_params(&["job", "results"]);
    cache.begin(&key).unwrap();
    assert!(cache.commit(&key, &["results"]).is_err());
    assert!(!cache.contains(&key));

    session.cleanup().unwrap();
}

#[test]
fn clear_drops_every_entry() {
    let session = SessionContext::open("test", unique_temp_dir("dg_session_clear")).unwrap();
    let cache = ContentCache::for_workspace(session.workspace()).unwrap();

    let artifact = session.path("scene.hdr");
    fs::write(&artifact, "#?RADIANCE\n").unwrap();

    let key_a = CacheKey::for_params(&["job-a", "results"]);
    let key_b = CacheKey::for_params(&["job-b", "results"]);
    cache.store(&key_a, &[&artifact]).unwrap();
    cache.store(&key_b, &[&artifact]).unwrap();

    cache.clear().unwrap();
    assert!(!cache.contains(&key_a));
    assert!(!cache.contains(&key_b));

    session.cleanup().unwrap();
}
