#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common fixtures for kernel integration tests.
//!
//! Fixtures build the REAL standard schema, so tests exercise the same
//! catalog, layouts and containers the binary uses.

#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use jetstream_kernel::registry::{SchemaRegistry, SchemaSettings};
use jetstream_kernel::schema::ContainerType;
use jetstream_test_utils::test_container;

/// The standard schema, built once per test binary.
pub static REGISTRY: LazyLock<Arc<SchemaRegistry>> = LazyLock::new(|| {
    Arc::new(SchemaRegistry::standard(&SchemaSettings::default()).expect("standard schema builds"))
});

pub fn registry() -> Arc<SchemaRegistry> {
    Arc::clone(&REGISTRY)
}

/// A(Basic, "Zed"), B(Basic, "Alpha"), C(Multimedia, "Anything").
pub fn abc_container() -> ContainerType {
    test_container(
        "body",
        &[
            ("A", "Basic", "Zed"),
            ("B", "Basic", "Alpha"),
            ("C", "Multimedia", "Anything"),
        ],
    )
}
