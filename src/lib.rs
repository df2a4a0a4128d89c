//! Workspace root package; exists only to carry workspace-level tooling (pre-commit hooks).
