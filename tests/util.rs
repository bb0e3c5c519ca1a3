//! Shared test utilities for integration tests
//!
//! Provides fixture trees shaped like real Python projects.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Write `body` at `rel` inside `tmp`, creating parents.
pub fn put(
    tmp: &assert_fs::TempDir,
    rel: &str,
    body: &str,
)
{
    tmp.child(rel)
        .write_str(body)
        .expect("write fixture file");
}

/// A flat-layout project with a native namespace package, a regular
/// package, a top-level module, and the usual clutter next to them.
pub fn make_project_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    // native namespace: no init in `acme`, root init two levels down
    put(&tmp, "acme/widgets/__init__.py", "");
    put(&tmp, "acme/widgets/core.py", "X = 1\n");
    put(&tmp, "acme/widgets/sub/__init__.py", "");
    put(&tmp, "acme/gadgets/__init__.py", "\"\"\"Gadgets.\"\"\"\n");

    // regular package and a lone module
    put(&tmp, "tool/__init__.py", "");
    put(&tmp, "tool/cli.py", "");
    put(&tmp, "setup.py", "");

    // clutter that must not surface
    put(&tmp, ".venv/lib/python3.12/site-packages/dep/__init__.py", "");
    put(&tmp, "venv/lib/pkg/__init__.py", "");
    put(&tmp, "build/lib/tool/__init__.py", "");
    put(&tmp, "tool/__pycache__/cli.cpython-312.py", "");
    put(&tmp, "tests/test_tool.py", "");
    put(&tmp, "docs/conf.py", "");
    put(&tmp, "acme.egg-info/top_level.py", "");
    put(&tmp, "README.md", "# project\n");

    tmp
}
