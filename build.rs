//! Stamps build date and time for `ase-rgba --version`.
//!
//! Either value can be pinned from the environment for reproducible builds.

use time::{format_description, OffsetDateTime};

fn stamp(var: &str, now: OffsetDateTime, pattern: &str) {
    let value = std::env::var(var).ok().or_else(|| {
        let fmt = format_description::parse(pattern).ok()?;
        now.format(&fmt).ok()
    });
    println!("cargo:rustc-env={var}={}", value.as_deref().unwrap_or("unknown"));
    println!("cargo:rerun-if-env-changed={var}");
}

fn main() {
    let now = OffsetDateTime::now_utc();
    stamp("ASE_RGBA_BUILD_DATE", now, "[year]-[month]-[day]");
    stamp("ASE_RGBA_BUILD_TIME", now, "[hour]:[minute] UTC");
}
