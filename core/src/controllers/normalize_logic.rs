//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::traits::KeyValueStore;
use crate::daemon::types::NormalizeOutcome;
use crate::hal::properties::PropertyStore;
use crate::hal::settings::GlobalSettings;
use crate::registry::value_tweaks::{self, ValueTweak};

use std::io::{self, Write};

/// Brings `key` to `desired`, writing only when it differs.
pub fn normalize<S>(store: &S, key: &str, desired: &str) -> NormalizeOutcome
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(current)) if current == desired => return NormalizeOutcome::AlreadySet,
        Ok(current) => log::info!(
            "Normalize: {} {key} is {:?}, want '{desired}'",
            store.name(),
            current
        ),
        Err(e) => log::warn!("Normalize: reading {} {key} failed: {e}", store.name()),
    }
    if let Err(e) = store.put(key, desired) {
        return NormalizeOutcome::Failed(format!("write {key}={desired}: {e}"));
    }
    match store.get(key) {
        Ok(Some(current)) if current == desired => NormalizeOutcome::Updated,
        Ok(current) => {
            NormalizeOutcome::Failed(format!("{key} reads back {current:?} after write"))
        }
        Err(e) => {
            log::warn!("Normalize: could not verify {key}: {e}");
            NormalizeOutcome::Updated
        }
    }
}

/// Applies every tweak and reports one line per key. True when none failed.
pub fn apply_tweaks<S, W>(store: &S, tweaks: &[ValueTweak], out: &mut W) -> bool
where
    S: KeyValueStore + ?Sized,
    W: Write,
{
    let mut all_ok = true;
    for tweak in tweaks {
        let outcome = normalize(store, tweak.key, tweak.value);
        let line = match &outcome {
            NormalizeOutcome::AlreadySet => {
                format!("{} {}={} already set", store.name(), tweak.key, tweak.value)
            }
            NormalizeOutcome::Updated => {
                format!("{} {}={} updated", store.name(), tweak.key, tweak.value)
            }
            NormalizeOutcome::Failed(reason) => {
                format!("{} {} FAILED: {reason}", store.name(), tweak.key)
            }
        };
        if let Err(e) = writeln!(out, "{line}") {
            log::warn!("Normalize: could not report '{line}': {e}");
        }
        all_ok &= outcome.is_ok();
    }
    all_ok
}

fn exit_code(all_ok: bool) -> i32 {
    if all_ok { 0 } else { 1 }
}

pub fn boot_values_main() -> i32 {
    let store = PropertyStore::default();
    let ok = apply_tweaks(&store, value_tweaks::get_boot_prop_tweaks(), &mut io::stdout());
    exit_code(ok)
}

pub fn network_fix_main() -> i32 {
    let store = GlobalSettings::default();
    let ok = apply_tweaks(
        &store,
        value_tweaks::get_network_setting_tweaks(),
        &mut io::stdout(),
    );
    exit_code(ok)
}
